//! `driversfriend seed`: Load regulations into the knowledge store.

use driversfriend_config::AppConfig;
use std::path::Path;
use tracing::info;

pub async fn run(config: AppConfig, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let regulations = driversfriend_store::load_seed_file(file).await?;
    let store = driversfriend_store::open_from_config(&config.store).await?;

    let inserted = store.insert_many(regulations).await?;
    info!(store = store.name(), inserted, file = %file.display(), "Seed complete");
    println!("✅ Inserted {inserted} regulation(s) into the {} store", store.name());

    Ok(())
}
