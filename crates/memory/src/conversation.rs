//! Conversation Memory: a handle over a [`ConversationStore`] plus recent
//! topic extraction used for contextual replies.

use driversfriend_core::error::MemoryError;
use driversfriend_core::language::Language;
use driversfriend_core::memory::ConversationStore;
use driversfriend_core::message::{ConversationMessage, Sender};
use std::sync::Arc;

/// Default number of user-authored entries inspected for topics.
pub const DEFAULT_TOPIC_WINDOW: usize = 5;

/// Topics recognised in past user messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationTopic {
    Speed,
    Parking,
    Alcohol,
    Seatbelt,
}

impl ConversationTopic {
    /// Checked in this order; a message maps to the first topic that matches.
    const ALL: [ConversationTopic; 4] = [Self::Speed, Self::Parking, Self::Alcohol, Self::Seatbelt];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Speed => &["speed", "limit", "schnell", "geschwindigkeit"],
            Self::Parking => &["parking", "park", "parken"],
            Self::Alcohol => &["alcohol", "drink", "alkohol"],
            Self::Seatbelt => &["seatbelt", "belt", "gurt"],
        }
    }

    /// Classify a single message by substring match.
    pub fn detect(message: &str) -> Option<Self> {
        let lower = message.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|topic| topic.keywords().iter().any(|k| lower.contains(k)))
    }

    /// Localized display name.
    pub fn label(self, language: Language) -> &'static str {
        match self {
            Self::Speed => language.pick("speed limits", "Geschwindigkeitsbegrenzungen"),
            Self::Parking => language.pick("parking", "Parken"),
            Self::Alcohol => language.pick("alcohol limits", "Alkoholgrenzwerte"),
            Self::Seatbelt => language.pick("seatbelt safety", "Sicherheitsgurte"),
        }
    }
}

/// Per-user bounded message log, passed to the pipeline by handle.
#[derive(Clone)]
pub struct ConversationMemory {
    store: Arc<dyn ConversationStore>,
    topic_window: usize,
}

impl ConversationMemory {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self {
            store,
            topic_window: DEFAULT_TOPIC_WINDOW,
        }
    }

    pub fn with_topic_window(mut self, window: usize) -> Self {
        self.topic_window = window.max(1);
        self
    }

    pub fn backend_name(&self) -> &str {
        self.store.name()
    }

    /// Append a message to the user's log.
    pub async fn record(&self, user_id: &str, message: ConversationMessage) -> Result<(), MemoryError> {
        self.store.append(user_id, message).await
    }

    /// The most recent `limit` entries, oldest first.
    pub async fn recent(&self, user_id: &str, limit: usize) -> Result<Vec<ConversationMessage>, MemoryError> {
        let mut history = self.store.history(user_id).await?;
        let skip = history.len().saturating_sub(limit);
        history.drain(..skip);
        Ok(history)
    }

    /// The user's full log, oldest first.
    pub async fn history(&self, user_id: &str) -> Result<Vec<ConversationMessage>, MemoryError> {
        self.store.history(user_id).await
    }

    pub async fn clear(&self, user_id: &str) -> Result<(), MemoryError> {
        self.store.clear(user_id).await
    }

    /// Distinct topics of the last `topic_window` user-authored entries,
    /// in order of first occurrence.
    pub async fn recent_topics(&self, user_id: &str) -> Result<Vec<ConversationTopic>, MemoryError> {
        let history = self.store.history(user_id).await?;
        let user_messages: Vec<&ConversationMessage> = history
            .iter()
            .filter(|m| m.sender == Sender::User)
            .collect();
        let start = user_messages.len().saturating_sub(self.topic_window);

        let mut topics = Vec::new();
        for message in &user_messages[start..] {
            if let Some(topic) = ConversationTopic::detect(&message.content)
                && !topics.contains(&topic)
            {
                topics.push(topic);
            }
        }
        Ok(topics)
    }
}
