//! Database pool, schema, and history queries
//!
//! One table, `user_history`, one row per accepted request. Rows are never
//! updated or deleted by the application.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Result;
use thiserror::Error;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection pool failure
    #[error("database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// SQLite failure
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Create a new database connection pool
///
/// Initializes the pool and ensures the history table exists.
///
/// # Arguments
///
/// * `database_path` - Path to the SQLite database file
///
/// # Errors
///
/// Returns a `StoreError` if the pool cannot be built or the schema
/// cannot be created.
pub fn create_pool(database_path: &str) -> Result<DbPool, StoreError> {
    let manager = SqliteConnectionManager::file(database_path);
    let pool = Pool::builder()
        .max_size(4) // Small pool: one writer plus occasional readers
        .build(manager)?;

    let conn = pool.get()?;
    init_schema(&conn)?;

    Ok(pool)
}

/// Get a connection from the pool
///
/// The connection is returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, r2d2::Error> {
    pool.get()
}

/// Ensure the history table exists
fn init_schema(conn: &DbConnection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS user_history (
             user_id   INTEGER NOT NULL,
             user_name TEXT,
             input     TEXT NOT NULL,
             timestamp DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
         )",
        [],
    )?;
    Ok(())
}

/// A logged entry capturing who requested a conversion and what they submitted
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Telegram user ID of the requester
    pub user_id: i64,
    /// Telegram username, if available
    pub user_name: Option<String>,
    /// The validated URL/text that was encoded
    pub input: String,
    /// Insert time, assigned by the store (SQLite format: YYYY-MM-DD HH:MM:SS)
    pub timestamp: String,
}

/// Inserts one history row with the current time.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `user_id` - Telegram user ID of the requester
/// * `user_name` - Telegram username, if available
/// * `input` - The validated URL/text that was encoded
pub fn insert_history(conn: &DbConnection, user_id: i64, user_name: Option<&str>, input: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO user_history (user_id, user_name, input, timestamp) VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP)",
        &[
            &user_id as &dyn rusqlite::ToSql,
            &user_name as &dyn rusqlite::ToSql,
            &input as &dyn rusqlite::ToSql,
        ],
    )?;
    Ok(())
}

/// Returns the most recent history rows for a user, newest first.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `user_id` - Telegram user ID
/// * `limit` - Maximum number of rows (default 10)
pub fn get_history(conn: &DbConnection, user_id: i64, limit: Option<i32>) -> Result<Vec<HistoryEntry>> {
    let limit = limit.unwrap_or(10);
    let mut stmt = conn.prepare(
        "SELECT user_id, user_name, input, timestamp FROM user_history
         WHERE user_id = ?1 ORDER BY rowid DESC LIMIT ?2",
    )?;
    let rows = stmt.query_map(
        &[&user_id as &dyn rusqlite::ToSql, &limit as &dyn rusqlite::ToSql],
        |row| {
            Ok(HistoryEntry {
                user_id: row.get(0)?,
                user_name: row.get(1)?,
                input: row.get(2)?,
                timestamp: row.get(3)?,
            })
        },
    )?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

/// Counts history rows for a user. Test helper; the /history command
/// reads rows via `get_history`.
pub fn count_history(conn: &DbConnection, user_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM user_history WHERE user_id = ?1",
        &[&user_id as &dyn rusqlite::ToSql],
        |row| row.get(0),
    )
}
