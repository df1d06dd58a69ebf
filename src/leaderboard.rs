//! Top-players list
//!
//! Fetched from `/topUsers` and cached in LocalStorage so the board renders
//! instantly on the next visit while a fresh copy loads.

use serde::{Deserialize, Serialize};

use crate::backend::TopUser;

/// Maximum entries shown on the board
pub const MAX_ENTRIES: usize = 10;

/// Ordered leaderboard (descending by points)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<TopUser>,
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tile_tap_leaderboard";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from backend entries, normalizing order and size. The server
    /// already sorts, but a stale cache or a lenient backend must not break
    /// the display.
    pub fn from_entries(mut entries: Vec<TopUser>) -> Self {
        entries.sort_by(|a, b| b.points.cmp(&a.points));
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score on the board (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.points)
    }

    /// 1-indexed rank of a player, if present
    pub fn rank_of(&self, username: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.username == username)
            .map(|i| i + 1)
    }

    /// Whether a points total would make the board
    pub fn qualifies(&self, points: i64) -> bool {
        if points <= 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| points > e.points).unwrap_or(true)
    }

    /// Load the cached board from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load_cached() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(board) = serde_json::from_str::<Leaderboard>(&json) {
                    log::info!("Loaded {} cached leaderboard entries", board.entries.len());
                    return board;
                }
            }
        }

        Self::new()
    }

    /// Cache the board in LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn cache(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_cached() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn cache(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, points: i64) -> TopUser {
        TopUser {
            username: name.to_string(),
            points,
        }
    }

    #[test]
    fn test_from_entries_sorts_and_truncates() {
        let entries: Vec<TopUser> = (0..15).map(|i| user(&format!("u{i}"), i)).collect();
        let board = Leaderboard::from_entries(entries);
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert_eq!(board.top_score(), Some(14));
        for pair in board.entries.windows(2) {
            assert!(pair[0].points >= pair[1].points);
        }
    }

    #[test]
    fn test_rank_of() {
        let board = Leaderboard::from_entries(vec![
            user("first", 100),
            user("second", 50),
            user("third", 10),
        ]);
        assert_eq!(board.rank_of("first"), Some(1));
        assert_eq!(board.rank_of("third"), Some(3));
        assert_eq!(board.rank_of("nobody"), None);
    }

    #[test]
    fn test_qualifies() {
        let board = Leaderboard::from_entries((0..10).map(|i| user(&format!("u{i}"), 100 + i)).collect());
        assert!(board.qualifies(101)); // beats the lowest (100)
        assert!(!board.qualifies(100));
        assert!(!board.qualifies(0));

        let short = Leaderboard::from_entries(vec![user("only", 5)]);
        assert!(short.qualifies(1));
    }
}
