use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::prelude::*;

use qurl::core::{config, init_logger};
use qurl::storage::{create_pool, HistoryStore};
use qurl::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram QR bot
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
/// Individual request failures never terminate the process; the dispatcher
/// logs them and keeps polling.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    log::info!("Starting QR bot...");

    // Create bot instance
    let bot = create_bot()?;

    // Create database connection pool (also ensures the schema exists)
    let db_pool = Arc::new(
        create_pool(&config::DATABASE_PATH).map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?,
    );
    log::info!("Database ready at {}", *config::DATABASE_PATH);

    // Register the command list in the Telegram UI
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}. Continuing anyway.", e);
    }

    let history = HistoryStore::new(Arc::clone(&db_pool));
    let deps = HandlerDeps::new(db_pool, history);

    log::info!("Bot started, polling for updates");

    Dispatcher::builder(bot, schema(deps))
        .dependencies(DependencyMap::new())
        .default_handler(|upd| async move {
            log::debug!("Unhandled update: {:?}", upd);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shut down");
    Ok(())
}
