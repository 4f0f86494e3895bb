//! A store that is never reachable.
//!
//! Selected with `store.backend = "none"` so the assistant runs purely on
//! live retrieval and the offline table. Every call fails with
//! [`StoreError::Unavailable`], which the pipeline treats as "no answer".

use async_trait::async_trait;
use driversfriend_core::error::StoreError;
use driversfriend_core::regulation::Regulation;
use driversfriend_core::store::KnowledgeStore;

pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn err(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

impl Default for UnavailableStore {
    fn default() -> Self {
        Self::new("no knowledge store configured")
    }
}

#[async_trait]
impl KnowledgeStore for UnavailableStore {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn search(&self, _keywords: &[String], _language: &str) -> Result<Vec<Regulation>, StoreError> {
        Err(self.err())
    }

    async fn by_category_and_language(
        &self,
        _category: &str,
        _language: &str,
    ) -> Result<Vec<Regulation>, StoreError> {
        Err(self.err())
    }

    async fn insert(&self, _regulation: Regulation) -> Result<(), StoreError> {
        Err(self.err())
    }

    async fn list_categories(&self, _language: &str) -> Result<Vec<String>, StoreError> {
        Err(self.err())
    }
}
