//! Background history writer
//!
//! Persists one row per accepted request without delaying the reply to
//! the user. The writer owns its serialization lock; callers never touch
//! the connection directly.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::db::{self, DbPool};

/// Fire-and-forget history writer.
///
/// Each `record` call spawns a short-lived task that takes the store's
/// write lock, performs a single insert+commit, and logs any failure.
/// Storage errors never affect the user-visible response: by the time a
/// write is attempted the photo has already been sent.
///
/// In-flight writes are dropped on process exit; there is no drain.
#[derive(Clone)]
pub struct HistoryStore {
    pool: Arc<DbPool>,
    write_lock: Arc<Mutex<()>>,
}

impl HistoryStore {
    /// Creates a store over an existing pool.
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Records one accepted request.
    ///
    /// Returns the spawned task's handle so tests can await completion;
    /// production callers drop it.
    pub fn record(&self, user_id: i64, user_name: Option<String>, input: String) -> JoinHandle<()> {
        let pool = Arc::clone(&self.pool);
        let lock = Arc::clone(&self.write_lock);

        tokio::spawn(async move {
            // Serialize insert+commit sequences so concurrent writers
            // never interleave on the shared database.
            let _guard = lock.lock().await;

            let conn = match db::get_connection(&pool) {
                Ok(conn) => conn,
                Err(e) => {
                    log::error!("Failed to get DB connection for history write: {}", e);
                    return;
                }
            };

            if let Err(e) = db::insert_history(&conn, user_id, user_name.as_deref(), &input) {
                log::error!("Error storing user history for user {}: {}", user_id, e);
            }
        })
    }
}
