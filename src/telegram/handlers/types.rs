//! Handler types and dependencies

use std::sync::Arc;

use dashmap::DashMap;
use teloxide::types::ChatId;

use crate::core::qr::ColorScheme;
use crate::storage::{DbPool, HistoryStore};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
///
/// The pending map is the bot's conversational state: chats that issued
/// /qr_code (or picked a color) and whose next message should be
/// converted. One entry per chat, consumed exactly once via `take`.
#[derive(Clone)]
pub struct HandlerDeps {
    pub db_pool: Arc<DbPool>,
    pub history: HistoryStore,
    pending: Arc<DashMap<ChatId, ColorScheme>>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(db_pool: Arc<DbPool>, history: HistoryStore) -> Self {
        Self {
            db_pool,
            history,
            pending: Arc::new(DashMap::new()),
        }
    }

    /// Arms the one-shot entry for a chat: its next text message will be
    /// converted with the given palette. Re-arming overwrites the palette.
    pub fn arm(&self, chat_id: ChatId, scheme: ColorScheme) {
        self.pending.insert(chat_id, scheme);
    }

    /// Whether a chat is currently awaiting input.
    pub fn is_awaiting(&self, chat_id: ChatId) -> bool {
        self.pending.contains_key(&chat_id)
    }

    /// Consumes the one-shot entry for a chat.
    ///
    /// Returns the armed palette at most once; a second call without
    /// re-arming returns `None` and the message falls through to
    /// ordinary idle handling.
    pub fn take(&self, chat_id: ChatId) -> Option<ColorScheme> {
        self.pending.remove(&chat_id).map(|(_, scheme)| scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::create_pool;
    use tempfile::TempDir;

    fn test_deps(dir: &TempDir) -> HandlerDeps {
        let path = dir.path().join("bot.db");
        let pool = Arc::new(create_pool(path.to_str().unwrap()).expect("pool creation"));
        let history = HistoryStore::new(Arc::clone(&pool));
        HandlerDeps::new(pool, history)
    }

    #[test]
    fn test_one_shot_entry_is_consumed_exactly_once() {
        let dir = TempDir::new().unwrap();
        let deps = test_deps(&dir);
        let chat = ChatId(1);

        assert!(!deps.is_awaiting(chat));

        deps.arm(chat, ColorScheme::BlackWhite);
        assert!(deps.is_awaiting(chat));

        // First message consumes the entry.
        assert_eq!(deps.take(chat), Some(ColorScheme::BlackWhite));

        // A second message without re-arming finds nothing.
        assert!(!deps.is_awaiting(chat));
        assert_eq!(deps.take(chat), None);
    }

    #[test]
    fn test_rearming_overwrites_the_palette() {
        let dir = TempDir::new().unwrap();
        let deps = test_deps(&dir);
        let chat = ChatId(2);

        deps.arm(chat, ColorScheme::BlackWhite);
        deps.arm(chat, ColorScheme::BlueWhite);

        assert_eq!(deps.take(chat), Some(ColorScheme::BlueWhite));
        assert_eq!(deps.take(chat), None);
    }

    #[test]
    fn test_chats_are_armed_independently() {
        let dir = TempDir::new().unwrap();
        let deps = test_deps(&dir);

        deps.arm(ChatId(1), ColorScheme::BlackWhite);

        assert!(!deps.is_awaiting(ChatId(2)));
        assert_eq!(deps.take(ChatId(2)), None);

        // Chat 1 is unaffected by chat 2's lookups.
        assert_eq!(deps.take(ChatId(1)), Some(ColorScheme::BlackWhite));
    }

    #[test]
    fn test_clones_share_conversational_state() {
        // The dispatcher clones deps per branch; arming through one
        // clone must be visible to the others.
        let dir = TempDir::new().unwrap();
        let deps = test_deps(&dir);
        let clone = deps.clone();

        deps.arm(ChatId(3), ColorScheme::BlueWhite);
        assert_eq!(clone.take(ChatId(3)), Some(ColorScheme::BlueWhite));
        assert_eq!(deps.take(ChatId(3)), None);
    }
}
