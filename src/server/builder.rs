//! Server builder and run_server function

use crate::config::{Config, warn_insecure_config};
use crate::server::routes::{acl, health, projects, scans};
use crate::server::server::HttpServer;
use crate::utils::error::{HubError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| HubError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

/// Run the server with an already loaded configuration
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting scanhub");
    warn_insecure_config(config.auth());

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!("Server starting at: http://{}", server.config().address());
    info!("API Endpoints:");
    info!("   GET  {} - Health check", health::HEALTH);
    info!("   GET  {} - Merged grants", acl::GRANTS);
    info!("   POST {} - Permission query", acl::CAN);
    info!("   GET  {} - Projects", projects::PROJECTS);
    info!("   GET  {} - Scan configurations", scans::PROJECT_SCAN_CONFIGS);

    server.start().await
}
