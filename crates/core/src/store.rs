//! Knowledge Store trait: the structured regulation collection.
//!
//! The pipeline only ever calls `search` and `by_category_and_language`;
//! `insert`, `insert_many` and `list_categories` are administrative.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::regulation::Regulation;

#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// The backend name (e.g., "sqlite", "in_memory", "unavailable").
    fn name(&self) -> &str;

    /// Regulations whose keyword set intersects `keywords` and whose language
    /// tags match `language` (exact or prefix), in insertion order.
    async fn search(
        &self,
        keywords: &[String],
        language: &str,
    ) -> std::result::Result<Vec<Regulation>, StoreError>;

    /// Regulations of a given category for a language.
    async fn by_category_and_language(
        &self,
        category: &str,
        language: &str,
    ) -> std::result::Result<Vec<Regulation>, StoreError>;

    /// Insert a single regulation after validating it.
    async fn insert(&self, regulation: Regulation) -> std::result::Result<(), StoreError>;

    /// Insert a batch of regulations. Returns the number inserted.
    async fn insert_many(
        &self,
        regulations: Vec<Regulation>,
    ) -> std::result::Result<usize, StoreError> {
        let count = regulations.len();
        for regulation in regulations {
            self.insert(regulation).await?;
        }
        Ok(count)
    }

    /// Distinct categories available for a language, ascending.
    async fn list_categories(
        &self,
        language: &str,
    ) -> std::result::Result<Vec<String>, StoreError>;
}
