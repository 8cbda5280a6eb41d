//! # Shared State
//!
//! Process-wide mutable state handed to handlers by injection.
//!
//! The board is created once at startup, cloned into every handler that
//! needs it (clones share the same storage), never cleared, and dropped
//! with the process.

use std::sync::{Arc, RwLock};

/// Thread-safe, append-only list of posted messages
#[derive(Clone, Default)]
pub struct MessageBoard {
    messages: Arc<RwLock<Vec<String>>>,
}

impl MessageBoard {
    /// Create an empty board
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message
    pub fn post(&self, message: impl Into<String>) {
        let mut messages = self.messages.write().unwrap_or_else(|e| e.into_inner());
        messages.push(message.into());
    }

    /// Copy of all messages, oldest first
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        let messages = self.messages.read().unwrap_or_else(|e| e.into_inner());
        messages.clone()
    }

    /// Number of messages
    #[must_use]
    pub fn len(&self) -> usize {
        let messages = self.messages.read().unwrap_or_else(|e| e.into_inner());
        messages.len()
    }

    /// Check if nothing was posted yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for MessageBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageBoard")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_and_read() {
        let board = MessageBoard::new();
        assert!(board.is_empty());

        board.post("hello");
        board.post(String::from("world"));

        assert_eq!(board.messages(), vec!["hello", "world"]);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_clones_share_storage() {
        let board = MessageBoard::new();
        let other = board.clone();
        other.post("shared");

        assert_eq!(board.messages(), vec!["shared"]);
    }

    #[test]
    fn test_concurrent_posts() {
        use std::thread;

        let board = MessageBoard::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let board = board.clone();
                thread::spawn(move || {
                    for j in 0..50 {
                        board.post(format!("{i}-{j}"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(board.len(), 400);
    }
}
