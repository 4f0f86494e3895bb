//! Conversation message domain types.
//!
//! Every chat turn produces two messages: the user's inbound text and the
//! assistant's composed answer. Both are appended to the user's bounded
//! Conversation Memory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::regulation::Regulation;

/// Who authored a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The end user
    User,
    /// The assistant's composed answer
    Assistant,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }
}

/// A single entry in a user's conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// The text content
    pub content: String,

    /// Who sent this message
    pub sender: Sender,

    /// Timestamp
    pub timestamp: DateTime<Utc>,

    /// Structured search results attached to an assistant answer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_results: Vec<Regulation>,
}

impl ConversationMessage {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            search_results: Vec::new(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sender: Sender::Assistant,
            timestamp: Utc::now(),
            search_results: Vec::new(),
        }
    }

    /// Attach the structured results that produced this answer.
    pub fn with_search_results(mut self, results: Vec<Regulation>) -> Self {
        self.search_results = results;
        self
    }
}
