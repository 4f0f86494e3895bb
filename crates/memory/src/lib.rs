//! Conversation Memory implementations for Driver's Friend.

pub mod conversation;
pub mod in_memory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use conversation::{ConversationMemory, ConversationTopic, DEFAULT_TOPIC_WINDOW};
pub use in_memory::InMemoryConversationStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteConversationStore;

use driversfriend_config::MemoryConfig;
use driversfriend_core::error::MemoryError;
use driversfriend_core::memory::ConversationStore;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Build Conversation Memory from the `[memory]` config section.
pub async fn open_from_config(config: &MemoryConfig) -> Result<ConversationMemory, MemoryError> {
    let store: Arc<dyn ConversationStore> = match config.backend.as_str() {
        "memory" => Arc::new(InMemoryConversationStore::with_capacity(config.max_messages)),
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            if let Some(parent) = Path::new(&config.path).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    MemoryError::Storage(format!("Cannot create {}: {e}", parent.display()))
                })?;
            }
            Arc::new(SqliteConversationStore::new(&config.path, config.max_messages).await?)
        }
        other => {
            return Err(MemoryError::Storage(format!(
                "Unsupported memory backend: {other}"
            )));
        }
    };
    info!(backend = store.name(), max_messages = config.max_messages, "Conversation memory ready");
    Ok(ConversationMemory::new(store).with_topic_window(config.topic_window))
}
