//! In-memory backend: useful for testing and ephemeral sessions.

use async_trait::async_trait;
use driversfriend_core::error::MemoryError;
use driversfriend_core::memory::{ConversationStore, DEFAULT_MAX_MESSAGES};
use driversfriend_core::message::ConversationMessage;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-user logs kept in a map of bounded queues.
pub struct InMemoryConversationStore {
    logs: Arc<RwLock<HashMap<String, VecDeque<ConversationMessage>>>>,
    max_messages: usize,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_MESSAGES)
    }

    /// A store keeping at most `max_messages` entries per user (minimum 1).
    pub fn with_capacity(max_messages: usize) -> Self {
        Self {
            logs: Arc::new(RwLock::new(HashMap::new())),
            max_messages: max_messages.max(1),
        }
    }

    /// Number of users with a non-empty log.
    pub async fn user_count(&self) -> usize {
        self.logs.read().await.len()
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn append(&self, user_id: &str, message: ConversationMessage) -> Result<(), MemoryError> {
        let mut logs = self.logs.write().await;
        let log = logs.entry(user_id.to_string()).or_default();
        log.push_back(message);
        while log.len() > self.max_messages {
            log.pop_front();
        }
        Ok(())
    }

    async fn history(&self, user_id: &str) -> Result<Vec<ConversationMessage>, MemoryError> {
        let logs = self.logs.read().await;
        Ok(logs
            .get(user_id)
            .map(|log| log.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn clear(&self, user_id: &str) -> Result<(), MemoryError> {
        self.logs.write().await.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_and_read_back_in_order() {
        let store = InMemoryConversationStore::new();
        store.append("u1", ConversationMessage::user("first")).await.unwrap();
        store
            .append("u1", ConversationMessage::assistant("second"))
            .await
            .unwrap();

        let history = store.history("u1").await.unwrap();
        let contents: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn cap_evicts_oldest_first() {
        let store = InMemoryConversationStore::new();
        for i in 0..25 {
            store
                .append("u1", ConversationMessage::user(format!("msg {i}")))
                .await
                .unwrap();
        }

        let history = store.history("u1").await.unwrap();
        assert_eq!(history.len(), DEFAULT_MAX_MESSAGES);
        assert_eq!(history[0].content, "msg 5");
        assert_eq!(history[19].content, "msg 24");
    }

    #[tokio::test]
    async fn cap_holds_for_any_append_count() {
        for count in [0usize, 1, 19, 20, 21, 40, 57] {
            let store = InMemoryConversationStore::with_capacity(20);
            for i in 0..count {
                store
                    .append("u", ConversationMessage::user(i.to_string()))
                    .await
                    .unwrap();
            }
            let history = store.history("u").await.unwrap();
            assert_eq!(history.len(), count.min(20));
            if let Some(last) = history.last() {
                assert_eq!(last.content, (count - 1).to_string());
            }
        }
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = InMemoryConversationStore::new();
        store.append("a", ConversationMessage::user("hi")).await.unwrap();
        assert!(store.history("b").await.unwrap().is_empty());

        store.clear("a").await.unwrap();
        assert!(store.history("a").await.unwrap().is_empty());
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn concurrent_appends_respect_cap() {
        let store = Arc::new(InMemoryConversationStore::new());
        let mut handles = Vec::new();
        for i in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .append("shared", ConversationMessage::user(i.to_string()))
                    .await
                    .unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(store.history("shared").await.unwrap().len(), 20);
    }
}
