//! Content retrieval trait: live extraction from external documents.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;

/// A block of text extracted from a fetched document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    pub text: String,
    pub source_name: String,
    pub url: String,
    pub topic: String,
}

/// Everything one source produced for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageBundle {
    /// The single highest-scoring sentence
    pub direct_answer: String,

    /// Direct answer followed by the bounded supporting block
    pub summary: String,

    /// Supporting passages, best first
    pub passages: Vec<RetrievedPassage>,

    pub source_name: String,
    pub url: String,
    pub topic: String,

    /// Score of the direct answer sentence
    pub relevance_score: f32,

    /// Prior trust in the source (0.85 primary, 0.80 secondary)
    pub confidence: f32,
}

#[async_trait]
pub trait ContentRetriever: Send + Sync {
    /// The source name used for attribution (e.g. "routetogermany.com").
    fn name(&self) -> &str;

    /// Fetch and extract an answer for `query`.
    ///
    /// `Ok(None)` means the document was fetched but nothing relevant was
    /// found; errors mean the source could not be used at all.
    async fn retrieve(
        &self,
        query: &str,
        language: &str,
    ) -> std::result::Result<Option<PassageBundle>, RetrievalError>;
}
