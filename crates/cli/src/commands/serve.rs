//! `driversfriend serve`: Start the HTTP API server.

use driversfriend_config::AppConfig;

pub async fn run(mut config: AppConfig, port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🚗 Driver's Friend Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Store:     {}", config.store.backend);
    println!("   Sources:   {}", config.retriever.sources.len());

    driversfriend_gateway::start(config).await?;

    Ok(())
}
