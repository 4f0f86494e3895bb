//! In-memory backend: useful for testing and ephemeral deployments.

use async_trait::async_trait;
use driversfriend_core::error::StoreError;
use driversfriend_core::regulation::Regulation;
use driversfriend_core::store::KnowledgeStore;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory store that keeps regulations in insertion order.
pub struct InMemoryStore {
    regulations: Arc<RwLock<Vec<Regulation>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            regulations: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Build a store pre-populated with `regulations` (invalid ones are skipped).
    pub fn with_regulations(regulations: Vec<Regulation>) -> Self {
        let valid = regulations
            .into_iter()
            .filter(|r| r.validate().is_ok())
            .collect();
        Self {
            regulations: Arc::new(RwLock::new(valid)),
        }
    }

    pub async fn len(&self) -> usize {
        self.regulations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.regulations.read().await.is_empty()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KnowledgeStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn search(
        &self,
        keywords: &[String],
        language: &str,
    ) -> Result<Vec<Regulation>, StoreError> {
        let regulations = self.regulations.read().await;
        Ok(regulations
            .iter()
            .filter(|r| r.matches_any_keyword(keywords) && r.matches_language(language))
            .cloned()
            .collect())
    }

    async fn by_category_and_language(
        &self,
        category: &str,
        language: &str,
    ) -> Result<Vec<Regulation>, StoreError> {
        let regulations = self.regulations.read().await;
        Ok(regulations
            .iter()
            .filter(|r| r.category == category && r.matches_language(language))
            .cloned()
            .collect())
    }

    async fn insert(&self, regulation: Regulation) -> Result<(), StoreError> {
        regulation.validate()?;
        self.regulations.write().await.push(regulation);
        Ok(())
    }

    async fn list_categories(&self, language: &str) -> Result<Vec<String>, StoreError> {
        let regulations = self.regulations.read().await;
        let categories: BTreeSet<String> = regulations
            .iter()
            .filter(|r| r.matches_language(language))
            .map(|r| r.category.clone())
            .collect();
        Ok(categories.into_iter().collect())
    }
}
