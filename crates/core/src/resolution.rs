//! Inbound requests and outbound answers of the resolution pipeline.
//!
//! This is the transport-independent contract: the gateway and the CLI both
//! serialize these types as-is.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::regulation::Regulation;
use crate::retrieval::RetrievedPassage;

fn default_language() -> String {
    "en-US".into()
}

/// A single chat turn from a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            language: language.into(),
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Reject requests that must never enter the pipeline.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        if self.language.trim().is_empty() {
            return Err(ValidationError::EmptyLanguage);
        }
        Ok(())
    }
}

/// A resolved intent: a name and a confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "intent")]
    pub name: String,
    pub confidence: f32,
}

impl Intent {
    /// Build an intent; confidence is clamped into `[0, 1]`.
    pub fn new(name: impl Into<String>, confidence: f32) -> Self {
        Self {
            name: name.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn search() -> Self {
        Self::new("search", 0.9)
    }

    pub fn unknown() -> Self {
        Self::new("unknown", 0.3)
    }
}

/// The answer returned for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionResult {
    pub response: String,

    #[serde(flatten)]
    pub intent: Intent,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_results: Option<Vec<Regulation>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passages: Option<Vec<RetrievedPassage>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ResolutionResult {
    pub fn new(response: impl Into<String>, intent: Intent) -> Self {
        Self {
            response: response.into(),
            intent,
            search_results: None,
            passages: None,
            suggestions: None,
            source: None,
            url: None,
        }
    }

    /// Attach suggestions; an empty list is stored as `None`.
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = (!suggestions.is_empty()).then_some(suggestions);
        self
    }

    pub fn confidence(&self) -> f32 {
        self.intent.confidence
    }

    pub fn intent_name(&self) -> &str {
        &self.intent.name
    }
}

/// Structured store search output, as returned by the search service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub results: Vec<Regulation>,
    pub query: String,
    pub matched_keywords: Vec<String>,
    pub total_results: usize,
}
