//! Telegram bot integration: commands, handler schema, conversion flow

pub mod bot;
pub mod handlers;

pub use bot::{create_bot, setup_bot_commands, Command};
pub use handlers::schema::schema;
pub use handlers::types::{HandlerDeps, HandlerError};
