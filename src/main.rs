use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsdesk::app::AppContext;
use newsdesk::cli::{commands, Cli, Commands};
use newsdesk::config::Config;
use newsdesk::domain::{RegisterPayload, SupportRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?.with_api_url(cli.api_url);
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Feed { category, pages } => {
            commands::show_feed(&ctx, &category, pages).await?;
        }
        Commands::Search { query, pages } => {
            commands::search(&ctx, &query, pages).await?;
        }
        Commands::Topics => {
            commands::list_topics(&ctx).await?;
        }
        Commands::Location { refresh } => {
            commands::show_location(&ctx, refresh).await?;
        }
        Commands::Login {
            email,
            password,
            remember,
        } => {
            commands::login(&ctx, &email, &password, remember).await?;
        }
        Commands::Register {
            first_name,
            last_name,
            email,
            password,
            accept_terms,
        } => {
            let payload = RegisterPayload {
                first_name,
                last_name,
                email,
                password,
                accept_terms,
            };
            commands::register(&ctx, payload).await?;
        }
        Commands::Logout => {
            commands::logout(&ctx)?;
        }
        Commands::Whoami => {
            commands::whoami(&ctx)?;
        }
        Commands::ForgotPassword { email } => {
            commands::forgot_password(&ctx, &email).await?;
        }
        Commands::ResetPassword { email, code } => {
            commands::reset_password(&ctx, &email, &code).await?;
        }
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let request = SupportRequest {
                name,
                email,
                subject,
                message,
            };
            commands::contact(&ctx, request).await?;
        }
    }

    Ok(())
}
