//! A [`ContentRetriever`] over one configured document source.

use crate::extract::{extract_blocks, split_sentences};
use crate::fetch::DocumentFetcher;
use crate::scoring::SentenceScorer;
use crate::topics::topic_for_query;
use async_trait::async_trait;
use driversfriend_config::SourceConfig;
use driversfriend_core::error::RetrievalError;
use driversfriend_core::retrieval::{ContentRetriever, PassageBundle, RetrievedPassage};
use driversfriend_core::text::truncate_with_ellipsis;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Supporting blocks appended after the direct answer.
const MAX_SUPPORTING_BLOCKS: usize = 3;

pub struct WebRetriever {
    name: String,
    base_url: String,
    topic_paths: BTreeMap<String, String>,
    fallback_path: String,
    confidence: f32,
    max_summary_chars: usize,
    fetcher: Arc<dyn DocumentFetcher>,
}

impl WebRetriever {
    /// Build a retriever for the source at `position` in the configured order.
    pub fn from_config(
        source: &SourceConfig,
        position: usize,
        max_summary_chars: usize,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> Self {
        Self {
            name: source.name.clone(),
            base_url: source.base_url.trim_end_matches('/').to_string(),
            topic_paths: source.topic_paths.clone(),
            fallback_path: source.fallback_path.clone(),
            confidence: source.effective_confidence(position),
            max_summary_chars,
            fetcher,
        }
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Document URL for a topic key.
    pub fn url_for(&self, topic: &str) -> String {
        let path = self
            .topic_paths
            .get(topic)
            .unwrap_or(&self.fallback_path);
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Turn fetched markup into a bundle, or `None` when nothing relevant
    /// was found.
    fn build_bundle(
        &self,
        html: &str,
        query: &str,
        topic: &str,
        url: &str,
    ) -> Result<Option<PassageBundle>, RetrievalError> {
        let blocks = extract_blocks(html)?;
        let scorer = SentenceScorer::new(query, topic);

        let mut best: Option<(f32, String)> = None;
        let mut scored_blocks: Vec<(f32, usize)> = Vec::with_capacity(blocks.len());
        for (idx, block) in blocks.iter().enumerate() {
            let mut block_score = 0.0;
            for sentence in split_sentences(block) {
                let score = scorer.score(&sentence);
                if score > 0.0 {
                    block_score += score;
                }
                if score > 0.0 && best.as_ref().is_none_or(|(top, _)| score > *top) {
                    best = Some((score, sentence));
                }
            }
            scored_blocks.push((block_score, idx));
        }

        let Some((relevance_score, direct_answer)) = best else {
            debug!(source = %self.name, topic, "No sentence matched the query");
            return Ok(None);
        };

        // Highest scoring first; ties keep document order.
        scored_blocks.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        let supporting: Vec<&String> = scored_blocks
            .iter()
            .filter(|(score, _)| *score > 0.0)
            .take(MAX_SUPPORTING_BLOCKS)
            .map(|(_, idx)| &blocks[*idx])
            .collect();

        let joined = supporting
            .iter()
            .map(|b| without_sentence(b, &direct_answer))
            .filter(|b| !b.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        let summary = truncate_with_ellipsis(
            &format!("{direct_answer}\n\n{joined}"),
            self.max_summary_chars,
        );

        let passages = supporting
            .into_iter()
            .map(|text| RetrievedPassage {
                text: text.clone(),
                source_name: self.name.clone(),
                url: url.to_string(),
                topic: topic.to_string(),
            })
            .collect();

        Ok(Some(PassageBundle {
            direct_answer,
            summary,
            passages,
            source_name: self.name.clone(),
            url: url.to_string(),
            topic: topic.to_string(),
            relevance_score,
            confidence: self.confidence,
        }))
    }
}

/// The block with every occurrence of `sentence` removed, so the summary
/// does not repeat the direct answer.
fn without_sentence(block: &str, sentence: &str) -> String {
    split_sentences(block)
        .into_iter()
        .filter(|s| s != sentence)
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl ContentRetriever for WebRetriever {
    fn name(&self) -> &str {
        &self.name
    }

    async fn retrieve(
        &self,
        query: &str,
        _language: &str,
    ) -> Result<Option<PassageBundle>, RetrievalError> {
        let topic = topic_for_query(query);
        let url = self.url_for(topic);
        let html = self.fetcher.fetch(&url).await?;
        let bundle = self.build_bundle(&html, query, topic, &url)?;
        if let Some(b) = &bundle {
            info!(
                source = %self.name,
                topic,
                relevance = b.relevance_score,
                passages = b.passages.len(),
                "Extracted direct answer"
            );
        }
        Ok(bundle)
    }
}
