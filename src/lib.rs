//! Qurl - Telegram bot that turns links and text into QR code images
//!
//! This library provides all the functionality behind the bot:
//! URL validation, QR encoding, request history storage, and the
//! Telegram handler wiring.
//!
//! # Module Structure
//!
//! - `core`: configuration, logging, validation, and the QR encoder
//! - `storage`: SQLite history database and the background writer
//! - `telegram`: bot integration and handlers

pub mod core;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use self::core::config;
pub use self::core::qr::{ColorScheme, QrEncoder};
pub use self::core::validation::is_valid_url;
pub use self::storage::{create_pool, get_connection, DbConnection, DbPool, HistoryStore};
pub use self::telegram::{create_bot, schema, Command, HandlerDeps};
