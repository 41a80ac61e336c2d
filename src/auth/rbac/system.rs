//! RBAC system core functionality

use crate::utils::error::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::grants::GrantsDefinition;
use super::registry::{GrantsRegistry, GrantsSnapshot};

/// RBAC system for merging grant tables and resolving permissions
#[derive(Debug, Clone)]
pub struct RbacSystem {
    /// Shared grants registry
    pub(super) registry: Arc<GrantsRegistry>,
}

impl RbacSystem {
    /// Create an RBAC system with an empty grants database
    pub fn new() -> Self {
        Self {
            registry: Arc::new(GrantsRegistry::new()),
        }
    }

    /// Create an RBAC system over an existing registry
    pub fn with_registry(registry: Arc<GrantsRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<GrantsRegistry> {
        &self.registry
    }

    /// The currently published grants snapshot
    pub fn snapshot(&self) -> Arc<GrantsSnapshot> {
        self.registry.snapshot()
    }

    /// Merge a module's grant table
    pub fn merge_module(&self, module: &str, definition: GrantsDefinition) -> Result<bool> {
        debug!("Merging grants of module '{}'", module);
        self.registry.merge(module, definition)
    }

    /// Parse and merge a module's YAML grant table
    pub fn merge_module_yaml(&self, module: &str, source: &str) -> Result<bool> {
        let definition = GrantsDefinition::from_yaml_str(source)?;
        self.merge_module(module, definition)
    }

    /// Load a grants file and merge it under its file stem
    pub async fn load_grants_file<P: AsRef<Path>>(&self, path: P) -> Result<bool> {
        let path = path.as_ref();
        let module = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();

        info!("Loading grants file {}", path.display());
        let definition = GrantsDefinition::from_file(path).await?;
        self.merge_module(&module, definition)
    }
}

impl Default for RbacSystem {
    fn default() -> Self {
        Self::new()
    }
}
