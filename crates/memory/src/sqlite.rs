//! SQLite-backed conversation store.
//!
//! One row per message in `conversation_messages`; the per-user cap is
//! enforced inside the same transaction as the insert.

use async_trait::async_trait;
use chrono::Utc;
use driversfriend_core::error::MemoryError;
use driversfriend_core::memory::{ConversationStore, DEFAULT_MAX_MESSAGES};
use driversfriend_core::message::{ConversationMessage, Sender};
use driversfriend_core::regulation::Regulation;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

pub struct SqliteConversationStore {
    pool: SqlitePool,
    max_messages: usize,
}

impl SqliteConversationStore {
    /// Open (or create) a SQLite database at `path`.
    ///
    /// Pass `":memory:"` for an in-process ephemeral database.
    pub async fn new(path: &str, max_messages: usize) -> Result<Self, MemoryError> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| MemoryError::Storage(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let max_connections = if path.contains(":memory:") { 1 } else { 4 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| MemoryError::Storage(format!("Failed to open SQLite: {e}")))?;

        let store = Self {
            pool,
            max_messages: max_messages.max(1),
        };
        store.run_migrations().await?;
        info!("SQLite conversation store initialized at {path}");
        Ok(store)
    }

    /// Create from an existing pool with the default cap.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, MemoryError> {
        let store = Self {
            pool,
            max_messages: DEFAULT_MAX_MESSAGES,
        };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), MemoryError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS conversation_messages (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id        TEXT NOT NULL,
                sender         TEXT NOT NULL,
                content        TEXT NOT NULL,
                timestamp      TEXT NOT NULL,
                search_results TEXT NOT NULL DEFAULT '[]'
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| MemoryError::MigrationFailed(format!("conversation_messages table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_conversation_user ON conversation_messages(user_id, id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| MemoryError::MigrationFailed(format!("user index: {e}")))?;

        debug!("Conversation migrations complete");
        Ok(())
    }

    fn row_to_message(row: &sqlx::sqlite::SqliteRow) -> Result<ConversationMessage, MemoryError> {
        let sender_str: String = row
            .try_get("sender")
            .map_err(|e| MemoryError::QueryFailed(format!("sender column: {e}")))?;
        let content: String = row
            .try_get("content")
            .map_err(|e| MemoryError::QueryFailed(format!("content column: {e}")))?;
        let timestamp_str: String = row
            .try_get("timestamp")
            .map_err(|e| MemoryError::QueryFailed(format!("timestamp column: {e}")))?;
        let results_json: String = row
            .try_get("search_results")
            .map_err(|e| MemoryError::QueryFailed(format!("search_results column: {e}")))?;

        let sender = Sender::parse(&sender_str)
            .ok_or_else(|| MemoryError::QueryFailed(format!("unknown sender: {sender_str}")))?;
        let search_results: Vec<Regulation> = serde_json::from_str(&results_json)
            .map_err(|e| MemoryError::QueryFailed(format!("search_results JSON: {e}")))?;
        let timestamp = chrono::DateTime::parse_from_rfc3339(&timestamp_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(ConversationMessage {
            content,
            sender,
            timestamp,
            search_results,
        })
    }
}

#[async_trait]
impl ConversationStore for SqliteConversationStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn append(&self, user_id: &str, message: ConversationMessage) -> Result<(), MemoryError> {
        let results_json = serde_json::to_string(&message.search_results)
            .map_err(|e| MemoryError::Storage(format!("search_results serialization: {e}")))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| MemoryError::Storage(format!("BEGIN failed: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO conversation_messages (user_id, sender, content, timestamp, search_results)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(user_id)
        .bind(message.sender.as_str())
        .bind(&message.content)
        .bind(message.timestamp.to_rfc3339())
        .bind(&results_json)
        .execute(&mut *tx)
        .await
        .map_err(|e| MemoryError::Storage(format!("INSERT failed: {e}")))?;

        sqlx::query(
            r#"
            DELETE FROM conversation_messages
            WHERE user_id = ?1 AND id NOT IN (
                SELECT id FROM conversation_messages
                WHERE user_id = ?1
                ORDER BY id DESC
                LIMIT ?2
            )
            "#,
        )
        .bind(user_id)
        .bind(self.max_messages as i64)
        .execute(&mut *tx)
        .await
        .map_err(|e| MemoryError::Storage(format!("eviction failed: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| MemoryError::Storage(format!("COMMIT failed: {e}")))?;
        Ok(())
    }

    async fn history(&self, user_id: &str) -> Result<Vec<ConversationMessage>, MemoryError> {
        let rows = sqlx::query("SELECT * FROM conversation_messages WHERE user_id = ?1 ORDER BY id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| MemoryError::QueryFailed(format!("history: {e}")))?;

        rows.iter().map(Self::row_to_message).collect()
    }

    async fn clear(&self, user_id: &str) -> Result<(), MemoryError> {
        sqlx::query("DELETE FROM conversation_messages WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| MemoryError::Storage(format!("DELETE failed: {e}")))?;
        Ok(())
    }
}
