//! SQLite-backed request history

pub mod db;
pub mod history;

pub use db::{create_pool, get_connection, DbConnection, DbPool, HistoryEntry, StoreError};
pub use history::HistoryStore;
