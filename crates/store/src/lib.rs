//! # Driver's Friend Knowledge Store
//!
//! Backends for the curated regulation collection.
//!
//! - [`InMemoryStore`]: ephemeral, used in tests and for `store.backend = "memory"`
//! - [`SqliteStore`]: durable, the default (`feature = "sqlite"`)
//! - [`UnavailableStore`]: always fails, for running on live retrieval alone

pub mod in_memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod unavailable;

pub use in_memory::InMemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
pub use unavailable::UnavailableStore;

use driversfriend_config::StoreConfig;
use driversfriend_core::error::StoreError;
use driversfriend_core::regulation::Regulation;
use driversfriend_core::store::KnowledgeStore;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Open the backend selected by `config.backend`.
pub async fn open_from_config(config: &StoreConfig) -> Result<Arc<dyn KnowledgeStore>, StoreError> {
    let store: Arc<dyn KnowledgeStore> = match config.backend.as_str() {
        "memory" => Arc::new(InMemoryStore::new()),
        "none" => Arc::new(UnavailableStore::default()),
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            if let Some(parent) = Path::new(&config.path).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    StoreError::Storage(format!("Cannot create {}: {e}", parent.display()))
                })?;
            }
            Arc::new(SqliteStore::new(&config.path).await?)
        }
        other => {
            return Err(StoreError::Unavailable(format!(
                "Unsupported store backend: {other}"
            )));
        }
    };
    info!(backend = store.name(), "Knowledge store ready");
    Ok(store)
}

/// Read a JSON array of regulations from disk (the `seed` file format).
pub async fn load_seed_file(path: &Path) -> Result<Vec<Regulation>, StoreError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::Storage(format!("Cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| StoreError::InvalidRecord(format!("{}: {e}", path.display())))
}
