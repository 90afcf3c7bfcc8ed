use chrono::{DateTime, Local, Utc};

use crate::app::{AppContext, Result};
use crate::domain::{
    Article, Category, ForgotPasswordPayload, LoginPayload, RegisterPayload,
    ResetPasswordPayload, SupportRequest,
};
use crate::feed::{FeedSession, FeedState};
use crate::topics::TopicDirectory;

/// Number of hot stories shown in the Home spotlight.
const SPOTLIGHT_LEN: usize = 4;
/// Characters of body text shown under each headline.
const SUMMARY_LEN: usize = 120;

pub async fn show_feed(ctx: &AppContext, label: &str, pages: u32) -> Result<()> {
    let category = Category::from_label(label);
    if category == Category::Search {
        println!("Use `newsdesk search <query>` to search");
        return Ok(());
    }

    let topics = TopicDirectory::load(ctx.client.as_ref()).await;
    let resolver = ctx.location_resolver();
    let location = if category == Category::Local {
        match resolver.resolve().await {
            Ok(location) => Some(location),
            Err(e) => {
                tracing::error!("Error initializing location: {}", e);
                None
            }
        }
    } else {
        resolver.cached()?
    };

    if category == Category::Local && location.is_none() {
        println!("Location unavailable; the Local feed cannot load yet");
        return Ok(());
    }

    let machine = ctx
        .feed_machine()
        .with_topics(topics)
        .with_location(location);
    let mut feed = ctx.feed_session(machine);

    if !feed.open(category).await {
        println!("Nothing loaded for {}", label);
    }
    load_pages(&mut feed, pages).await;

    print_feed(feed.state(), Utc::now());
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str, pages: u32) -> Result<()> {
    let mut feed = ctx.feed_session(ctx.feed_machine());

    if !feed.submit_search(query).await && feed.state().search_term.is_none() {
        println!("Nothing to search for");
        return Ok(());
    }
    load_pages(&mut feed, pages).await;

    print_feed(feed.state(), Utc::now());
    Ok(())
}

pub async fn list_topics(ctx: &AppContext) -> Result<()> {
    let topics = TopicDirectory::load(ctx.client.as_ref()).await;

    for topic in topics {
        println!("{} {} ({})", topic.emoji, topic.label, topic.key);
    }

    Ok(())
}

pub async fn show_location(ctx: &AppContext, refresh: bool) -> Result<()> {
    let resolver = ctx.location_resolver();
    if refresh {
        resolver.forget()?;
    }

    let location = resolver.resolve().await?;
    println!("{} ({})", location.display_name(), location.country_code);
    Ok(())
}

pub async fn login(ctx: &AppContext, email: &str, password: &str, remember: bool) -> Result<()> {
    let payload = LoginPayload {
        email: email.to_string(),
        password: password.to_string(),
        remember_me: remember,
    };
    let response = ctx.client.login(&payload).await?;
    ctx.sessions()
        .set_auth(&response.user, Some(response.token.as_str()), remember)?;

    println!("Signed in as {}", response.user.display_name());
    if !remember {
        println!("Session not remembered; pass --remember to keep it");
    }
    Ok(())
}

pub async fn register(ctx: &AppContext, payload: RegisterPayload) -> Result<()> {
    let response = ctx.client.register(&payload).await?;
    ctx.sessions()
        .set_auth(&response.user, Some(response.token.as_str()), false)?;

    println!(
        "{}",
        response
            .message
            .unwrap_or_else(|| format!("Account created for {}", response.user.email))
    );
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.sessions().clear()?;
    println!("Signed out");
    Ok(())
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.sessions().hydrate()? {
        Some(session) => println!(
            "[{}] {} <{}>",
            session.user.initials(),
            session.user.display_name(),
            session.user.email
        ),
        None => println!("Not signed in"),
    }
    Ok(())
}

pub async fn forgot_password(ctx: &AppContext, email: &str) -> Result<()> {
    let payload = ForgotPasswordPayload {
        email: email.to_string(),
    };
    let response = ctx.client.request_password_reset(&payload).await?;
    println!(
        "{}",
        response
            .message
            .unwrap_or_else(|| "Reset code sent".to_string())
    );
    Ok(())
}

pub async fn reset_password(ctx: &AppContext, email: &str, code: &str) -> Result<()> {
    let payload = ResetPasswordPayload {
        email: email.to_string(),
        code: code.to_string(),
    };
    let response = ctx.client.reset_password(&payload).await?;
    println!(
        "{}",
        response
            .message
            .unwrap_or_else(|| "Password reset".to_string())
    );
    Ok(())
}

pub async fn contact(ctx: &AppContext, request: SupportRequest) -> Result<()> {
    ctx.client.send_support_request(&request).await?;
    println!("Message sent, thanks for reaching out");
    Ok(())
}

async fn load_pages(feed: &mut FeedSession, pages: u32) {
    for _ in 1..pages {
        if !feed.state().can_load_more() || !feed.load_more().await {
            break;
        }
    }
}

fn print_feed(state: &FeedState, now: DateTime<Utc>) {
    println!("{}", state.title());
    println!("{}\n", now.with_timezone(&Local).format("%A, %-d %B"));

    if state.category == Category::Home && !state.hot_news.is_empty() {
        println!("Top stories");
        for (i, article) in state.hot_news.iter().take(SPOTLIGHT_LEN).enumerate() {
            println!("{}", format_article(i + 1, article, now));
            if let Some(image) = article.display_image() {
                println!("     {}", image);
            }
        }
        println!("\nLatest news");
    }

    let articles = state.articles();
    if articles.is_empty() {
        println!("No articles");
    }
    for (i, article) in articles.iter().enumerate() {
        println!("{}", format_article(i + 1, article, now));
    }

    if state.has_more {
        println!("\nMore available (page {} loaded, use --pages)", state.page);
    }
}

pub fn format_article(index: usize, article: &Article, now: DateTime<Utc>) -> String {
    let mut line = format!("{:>3}. {}", index, article.title);

    let summary = summarize(article.display_content());
    if !summary.is_empty() {
        line.push_str("\n     ");
        line.push_str(&summary);
    }

    line.push_str("\n     ");
    line.push_str(article.source_name());

    let time = article.display_time(now);
    if !time.is_empty() {
        line.push_str(" · ");
        line.push_str(&time);
    }
    if let Some(url) = &article.url {
        line.push_str("\n     ");
        line.push_str(url);
    }
    line
}

/// First line of `text`, cut to `SUMMARY_LEN` characters.
fn summarize(text: &str) -> String {
    let first = text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    if first.chars().count() <= SUMMARY_LEN {
        return first.to_string();
    }
    let mut cut: String = first.chars().take(SUMMARY_LEN).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}
