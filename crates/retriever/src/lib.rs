//! # Driver's Friend Content Retriever
//!
//! Live retrieval from external documents: fetch the page for the query's
//! topic, strip non-content markup, score sentences against the query and
//! return the best one as a direct answer with bounded supporting passages.
//!
//! Cross-source comparison is the pipeline's job; each configured source
//! becomes one independent [`WebRetriever`].

pub mod extract;
pub mod fetch;
pub mod scoring;
pub mod topics;
pub mod web;

pub use fetch::{DocumentFetcher, HttpFetcher};
pub use topics::topic_for_query;
pub use web::WebRetriever;

use driversfriend_config::RetrieverConfig;
use driversfriend_core::error::RetrievalError;
use driversfriend_core::retrieval::ContentRetriever;
use std::sync::Arc;
use tracing::info;

/// Build one retriever per configured source, in priority order, sharing
/// a single HTTP client.
pub fn build_retrievers(
    config: &RetrieverConfig,
) -> Result<Vec<Arc<dyn ContentRetriever>>, RetrievalError> {
    if !config.enabled {
        info!("Content retrieval disabled");
        return Ok(vec![]);
    }
    let fetcher: Arc<dyn DocumentFetcher> =
        Arc::new(HttpFetcher::new(config.timeout_secs, &config.user_agent)?);
    Ok(build_with_fetcher(config, fetcher))
}

/// Like [`build_retrievers`] with an explicit fetcher.
pub fn build_with_fetcher(
    config: &RetrieverConfig,
    fetcher: Arc<dyn DocumentFetcher>,
) -> Vec<Arc<dyn ContentRetriever>> {
    config
        .sources
        .iter()
        .enumerate()
        .map(|(position, source)| {
            Arc::new(WebRetriever::from_config(
                source,
                position,
                config.max_summary_chars,
                fetcher.clone(),
            )) as Arc<dyn ContentRetriever>
        })
        .collect()
}
