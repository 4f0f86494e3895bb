//! Shared mocks for pipeline tests.

use async_trait::async_trait;
use chrono::Utc;
use driversfriend_core::error::{RetrievalError, StoreError};
use driversfriend_core::regulation::Regulation;
use driversfriend_core::retrieval::{ContentRetriever, PassageBundle, RetrievedPassage};
use driversfriend_core::store::KnowledgeStore;
use std::sync::Mutex;
use std::time::Duration;

pub fn regulation(category: &str, language: &str, keywords: &[&str], content: &str) -> Regulation {
    Regulation {
        category: category.into(),
        country: "germany".into(),
        content: content.into(),
        languages: vec![language.into()],
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        source: "StVO".into(),
        fine_amount: None,
        last_updated: Utc::now(),
    }
}

/// A store whose every call fails and counts.
pub struct FailingStore {
    call_count: Mutex<usize>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self {
            call_count: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    fn fail(&self) -> StoreError {
        *self.call_count.lock().unwrap() += 1;
        StoreError::Unavailable("connection refused".into())
    }
}

#[async_trait]
impl KnowledgeStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn search(&self, _keywords: &[String], _language: &str) -> Result<Vec<Regulation>, StoreError> {
        Err(self.fail())
    }

    async fn by_category_and_language(
        &self,
        _category: &str,
        _language: &str,
    ) -> Result<Vec<Regulation>, StoreError> {
        Err(self.fail())
    }

    async fn insert(&self, _regulation: Regulation) -> Result<(), StoreError> {
        Err(self.fail())
    }

    async fn list_categories(&self, _language: &str) -> Result<Vec<String>, StoreError> {
        Err(self.fail())
    }
}

/// A store that never answers.
pub struct HangingStore;

#[async_trait]
impl KnowledgeStore for HangingStore {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn search(&self, _keywords: &[String], _language: &str) -> Result<Vec<Regulation>, StoreError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(vec![])
    }

    async fn by_category_and_language(
        &self,
        _category: &str,
        _language: &str,
    ) -> Result<Vec<Regulation>, StoreError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(vec![])
    }

    async fn insert(&self, _regulation: Regulation) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_categories(&self, _language: &str) -> Result<Vec<String>, StoreError> {
        Ok(vec![])
    }
}

/// A retriever returning a fixed bundle (or nothing) and counting calls.
pub struct ScriptedRetriever {
    name: String,
    bundle: Option<PassageBundle>,
    call_count: Mutex<usize>,
}

impl ScriptedRetriever {
    pub fn answering(name: &str, summary: &str, confidence: f32) -> Self {
        Self {
            name: name.into(),
            bundle: Some(bundle(name, summary, confidence)),
            call_count: Mutex::new(0),
        }
    }

    pub fn empty(name: &str) -> Self {
        Self {
            name: name.into(),
            bundle: None,
            call_count: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl ContentRetriever for ScriptedRetriever {
    fn name(&self) -> &str {
        &self.name
    }

    async fn retrieve(&self, _query: &str, _language: &str) -> Result<Option<PassageBundle>, RetrievalError> {
        *self.call_count.lock().unwrap() += 1;
        Ok(self.bundle.clone())
    }
}

pub struct FailingRetriever;

#[async_trait]
impl ContentRetriever for FailingRetriever {
    fn name(&self) -> &str {
        "failing"
    }

    async fn retrieve(&self, query: &str, _language: &str) -> Result<Option<PassageBundle>, RetrievalError> {
        Err(RetrievalError::Network {
            url: format!("https://failing.test/?q={query}"),
            reason: "connection reset".into(),
        })
    }
}

pub struct HangingRetriever;

#[async_trait]
impl ContentRetriever for HangingRetriever {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn retrieve(&self, _query: &str, _language: &str) -> Result<Option<PassageBundle>, RetrievalError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }
}

pub fn bundle(source: &str, summary: &str, confidence: f32) -> PassageBundle {
    let url = format!("https://{source}/page");
    PassageBundle {
        direct_answer: summary.into(),
        summary: summary.into(),
        passages: vec![RetrievedPassage {
            text: summary.into(),
            source_name: source.into(),
            url: url.clone(),
            topic: "speed_limit".into(),
        }],
        source_name: source.into(),
        url,
        topic: "speed_limit".into(),
        relevance_score: 20.0,
        confidence,
    }
}
