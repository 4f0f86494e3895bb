//! # Driver's Friend Resolver
//!
//! Turns a chat message into a [`ResolutionResult`](driversfriend_core::ResolutionResult)
//! by trying the knowledge store, live web sources and the static offline
//! table in order. See [`ResolutionPipeline`].

mod builtin;
pub mod classifier;
pub mod composer;
pub mod offline;
pub mod pipeline;

#[cfg(test)]
mod test_helpers;

pub use classifier::{QueryKind, classify};
pub use offline::{OfflineMatch, StaticKnowledgeTable};
pub use pipeline::ResolutionPipeline;

use driversfriend_config::AppConfig;
use driversfriend_core::error::Error;
use driversfriend_store::UnavailableStore;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Assemble a pipeline from configuration.
///
/// An unreachable knowledge store is not fatal: the pipeline starts with a
/// store that always fails and answers from the remaining tiers.
pub async fn build_from_config(config: &AppConfig) -> Result<ResolutionPipeline, Error> {
    let store = match driversfriend_store::open_from_config(&config.store).await {
        Ok(store) => store,
        Err(e) => {
            warn!(backend = %config.store.backend, error = %e, "Knowledge store unavailable, continuing without it");
            Arc::new(UnavailableStore::new(e.to_string()))
        }
    };

    let table = match &config.knowledge.table_path {
        Some(path) => StaticKnowledgeTable::load(Path::new(path))?,
        None => StaticKnowledgeTable::builtin(),
    };

    let retrievers = driversfriend_retriever::build_retrievers(&config.retriever)?;
    let memory = driversfriend_memory::open_from_config(&config.memory).await?;

    info!(
        store = store.name(),
        retrievers = retrievers.len(),
        table_entries = table.len(),
        memory = memory.backend_name(),
        "Resolution pipeline ready"
    );

    Ok(ResolutionPipeline::new(store, table)
        .with_retrievers(retrievers)
        .with_memory(memory)
        .with_store_timeout(Duration::from_secs(config.store.timeout_secs))
        .with_retrieval_timeout(Duration::from_secs(config.retriever.timeout_secs)))
}
