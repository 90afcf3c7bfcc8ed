pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "A terminal front-end for the news backend", long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides the config file and NEWSDESK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a feed: Home, Trending, Local or a topic label
    Feed {
        /// Category to show
        #[arg(default_value = "Home")]
        category: String,
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// Search articles
    Search {
        /// Search query
        query: String,
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },
    /// List the available topics
    Topics,
    /// Show the resolved location used for the Local feed
    Location {
        /// Forget the cached location and look it up again
        #[arg(long)]
        refresh: bool,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Keep the session for later runs
        #[arg(long)]
        remember: bool,
    },
    /// Create an account
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Accept the terms of service
        #[arg(long)]
        accept_terms: bool,
    },
    /// Forget the remembered session
    Logout,
    /// Show the remembered user
    Whoami,
    /// Request a password reset code
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Reset a password with an emailed code
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        code: String,
    },
    /// Send a message to support
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}
