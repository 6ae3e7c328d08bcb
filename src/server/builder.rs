//! Server bootstrap
//!
//! Loads configuration from the default location and runs the HTTP server.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use tracing::info;

/// Default configuration file path
const DEFAULT_CONFIG_PATH: &str = "config/itemflow.yaml";

/// Run the server with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("Starting itemflow");

    let config = match Config::from_file(DEFAULT_CONFIG_PATH).await {
        Ok(config) => {
            info!("Loaded configuration from {}", DEFAULT_CONFIG_PATH);
            config
        }
        Err(e) => {
            info!("Configuration file not loaded ({}), using defaults", e);
            Config::default()
        }
    };

    let server = HttpServer::new(&config).await?;

    info!(
        "Server starting at http://{}",
        config.server().address()
    );
    info!("API endpoints:");
    info!("   GET    /health         - Health check");
    info!("   GET    /items          - List items");
    info!("   POST   /items          - Create item");
    info!("   GET    /items/{{id}}     - Fetch item");
    info!("   PUT    /items/{{id}}     - Update item");
    info!("   DELETE /items/{{id}}     - Delete item");
    info!("   GET    /items/process  - Process all items");

    server.start().await
}
