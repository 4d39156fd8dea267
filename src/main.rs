mod config;
mod dispatcher;
mod extract;
mod platform;
mod reply;
mod translate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::Bot;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::dispatcher::MessageDispatcher;
use crate::translate::GoogleTranslator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,transbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!("Failed to load .env file: {}", e);
        }
    }

    // An explicitly named config file must exist; the default one is optional
    let (config_path, required) = match std::env::args().nth(1) {
        Some(path) => (PathBuf::from(path), true),
        None => (PathBuf::from("config.toml"), false),
    };

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path, required)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    info!("Configuration loaded successfully");
    info!("  Translator: {}", config.translation.base_url);
    info!("  Default target: {}", config.translation.default_target);
    info!(
        "  Inline reply limit: {} chars",
        config.limits.inline_reply_max_chars
    );

    let bot = Bot::new(&config.telegram.bot_token);

    let username = match &config.telegram.bot_username {
        Some(name) => name.clone(),
        None => platform::telegram::resolve_username(&bot)
            .await
            .context("BOT_USERNAME is not set and could not be resolved")?,
    };
    info!("  Bot username: @{}", username);

    let translator = GoogleTranslator::new(&config.translation)?;
    let dispatcher = Arc::new(MessageDispatcher::new(
        Arc::new(translator),
        &username,
        &config,
    ));

    info!("Bot is running...");
    platform::telegram::run(bot, dispatcher).await?;

    Ok(())
}
