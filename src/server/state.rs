//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::auth::rbac::RbacSystem;
use crate::config::Config;
use crate::modules;
use crate::server::routes;
use crate::services::{AttributeSanitizer, OwnershipLookup, OwnershipResolver, ProjectService, ScanConfigService};
use crate::storage::StorageLayer;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// HTTP server state shared across handlers
///
/// Every field is behind an `Arc`, so cloning the state per worker is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Token validation, grants and the enforcement guard
    pub auth: Arc<AuthSystem>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Project business service
    pub projects: Arc<ProjectService>,
    /// Scan configuration business service
    pub scan_configs: Arc<ScanConfigService>,
}

impl AppState {
    /// Connect storage and assemble the state
    pub async fn build(config: Config) -> Result<Self> {
        let storage = StorageLayer::new(&config.service.storage).await?;
        Self::with_storage(config, storage).await
    }

    /// Assemble the state over an already connected storage layer
    ///
    /// Built-in grant tables and configured grants files are merged before
    /// the guard sees its first request.
    pub async fn with_storage(config: Config, storage: StorageLayer) -> Result<Self> {
        let rbac = RbacSystem::new();
        modules::register_all(&rbac, config.acl()).await?;

        let rules = Arc::new(routes::rule_table());
        let auth = AuthSystem::new(config.auth(), rbac.clone(), rules)?;

        let lookup: Arc<dyn OwnershipLookup> = storage.database.clone();
        let resolver = OwnershipResolver::new(rbac, auth.jwt().clone(), lookup)
            .with_timeout(config.auth().validation_timeout());
        let resolver = Arc::new(resolver);
        let sanitizer = AttributeSanitizer::new(resolver);
        let projects = ProjectService::new(storage.database.clone(), sanitizer.clone());
        let scan_configs = ScanConfigService::new(storage.database.clone(), sanitizer);

        info!(
            "Application state ready: {} guarded operations, {} roles",
            auth.guard().rules().len(),
            auth.rbac().roles().len()
        );

        Ok(Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            storage: Arc::new(storage),
            projects: Arc::new(projects),
            scan_configs: Arc::new(scan_configs),
        })
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
