//! Conversation store trait: the injectable backing for per-user
//! Conversation Memory.
//!
//! Implementations: in-memory (tests, ephemeral sessions) and SQLite
//! (durable). Every implementation enforces a per-user cap with FIFO
//! eviction, preserving insertion order.

use async_trait::async_trait;

use crate::error::MemoryError;
use crate::message::ConversationMessage;

/// Default number of entries kept per user.
pub const DEFAULT_MAX_MESSAGES: usize = 20;

#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// The backend name (e.g., "in_memory", "sqlite").
    fn name(&self) -> &str;

    /// Append a message to a user's log, evicting the oldest entries once the
    /// log exceeds the cap.
    async fn append(
        &self,
        user_id: &str,
        message: ConversationMessage,
    ) -> std::result::Result<(), MemoryError>;

    /// A user's log, oldest first. Unknown users yield an empty log.
    async fn history(
        &self,
        user_id: &str,
    ) -> std::result::Result<Vec<ConversationMessage>, MemoryError>;

    /// Drop a user's log entirely.
    async fn clear(&self, user_id: &str) -> std::result::Result<(), MemoryError>;
}
