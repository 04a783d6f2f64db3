//! `maskrag serve`: Start the HTTP API server.

use maskrag_config::AppConfig;

pub async fn run(
    port_override: Option<u16>,
    host_override: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }
    if let Some(host) = host_override {
        config.gateway.host = host;
    }

    println!("MaskRAG Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Model:     {}", config.model);
    println!("   Endpoint:  {}", config.api_url);

    maskrag_gateway::start(config).await?;

    Ok(())
}
