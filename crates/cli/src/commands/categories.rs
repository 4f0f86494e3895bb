//! `driversfriend categories`: List knowledge store categories.

use driversfriend_config::AppConfig;

pub async fn run(config: AppConfig, language: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = driversfriend_store::open_from_config(&config.store).await?;
    let categories = store.list_categories(language).await?;

    if categories.is_empty() {
        println!("No categories for '{language}'. Seed the store first.");
        return Ok(());
    }
    for category in categories {
        println!("  {category}");
    }
    Ok(())
}
