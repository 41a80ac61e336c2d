//! Scan configuration service
//!
//! Scan configurations live inside a project. Adding one takes the right to
//! update the project; afterwards the configuration is guarded by its own
//! triplet, shared with the project's contributors.

use crate::auth::rbac::Action;
use crate::auth::types::AuthenticatedUser;
use crate::models::{NewScanConfig, ScanConfig, ScanConfigUpdate};
use crate::modules::projects::PROJECTS;
use crate::modules::scans::SCAN_CONFIGS;
use crate::storage::database::Database;
use crate::utils::error::{HubError, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::sanitizer::AttributeSanitizer;

/// Scan configurations, guarded per record
#[derive(Debug, Clone)]
pub struct ScanConfigService {
    database: Arc<Database>,
    sanitizer: AttributeSanitizer,
}

impl ScanConfigService {
    pub fn new(database: Arc<Database>, sanitizer: AttributeSanitizer) -> Self {
        Self { database, sanitizer }
    }

    /// Read one scan configuration
    pub async fn get(&self, user: &AuthenticatedUser, scan_config_id: i64) -> Result<Value> {
        let config = self.require_scan_config(scan_config_id).await?;
        self.output(user, &config).await
    }

    /// Scan configurations of a project the caller may read
    pub async fn list(&self, user: &AuthenticatedUser, project_id: i64) -> Result<Vec<Value>> {
        self.sanitizer
            .resolver()
            .resolve_for_user(user, Some(project_id), Action::Read, &PROJECTS)
            .await?;

        let records = self
            .database
            .list_scan_configs(project_id)
            .await?
            .into_iter()
            .map(|config| Ok((config.id, serde_json::to_value(&config)?)))
            .collect::<Result<Vec<_>>>()?;

        self.sanitizer
            .sanitize_list(user, &SCAN_CONFIGS, Action::Read, records)
            .await
    }

    /// Add a scan configuration to a project, owned by the caller
    pub async fn create(&self, user: &AuthenticatedUser, project_id: i64, payload: &Value) -> Result<Value> {
        self.sanitizer
            .resolver()
            .resolve_for_user(user, Some(project_id), Action::Update, &PROJECTS)
            .await?;

        let (_, sanitized) = self
            .sanitizer
            .sanitize_input(user, &SCAN_CONFIGS, None, Action::Create, payload)
            .await?;
        let new_config: NewScanConfig = serde_json::from_value(sanitized)
            .map_err(|e| HubError::validation(format!("Invalid scan config: {}", e)))?;
        let name = match new_config.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(HubError::validation("Scan config name is required")),
        };
        validate_resolution(new_config.resolution)?;

        let config = self
            .database
            .create_scan_config(project_id, user.id, &name, new_config.resolution, new_config.sensor)
            .await?;
        info!(
            "User {} created scan config {} in project {}",
            user.id, config.id, project_id
        );

        self.output(user, &config).await
    }

    /// Update the scan configuration fields the caller may write
    pub async fn update(&self, user: &AuthenticatedUser, scan_config_id: i64, payload: &Value) -> Result<Value> {
        let (_, sanitized) = self
            .sanitizer
            .sanitize_input(user, &SCAN_CONFIGS, Some(scan_config_id), Action::Update, payload)
            .await?;
        let update: ScanConfigUpdate = serde_json::from_value(sanitized)
            .map_err(|e| HubError::validation(format!("Invalid scan config update: {}", e)))?;
        if update.name.as_ref().is_some_and(|name| name.trim().is_empty()) {
            return Err(HubError::validation("Scan config name must not be empty"));
        }
        validate_resolution(update.resolution)?;

        let config = self.database.update_scan_config(scan_config_id, update).await?;
        self.output(user, &config).await
    }

    /// Delete a scan configuration
    pub async fn delete(&self, user: &AuthenticatedUser, scan_config_id: i64) -> Result<()> {
        self.sanitizer
            .resolver()
            .resolve_for_user(user, Some(scan_config_id), Action::Delete, &SCAN_CONFIGS)
            .await?;

        if !self.database.delete_scan_config(scan_config_id).await? {
            return Err(HubError::not_found(format!("Scan config {} not found", scan_config_id)));
        }
        info!("User {} deleted scan config {}", user.id, scan_config_id);
        Ok(())
    }

    async fn require_scan_config(&self, scan_config_id: i64) -> Result<ScanConfig> {
        self.database
            .find_scan_config(scan_config_id)
            .await?
            .ok_or_else(|| HubError::not_found(format!("Scan config {} not found", scan_config_id)))
    }

    async fn output(&self, user: &AuthenticatedUser, config: &ScanConfig) -> Result<Value> {
        self.sanitizer
            .sanitize_output(
                user,
                &SCAN_CONFIGS,
                config.id,
                Action::Read,
                &serde_json::to_value(config)?,
            )
            .await
    }
}

fn validate_resolution(resolution: Option<i32>) -> Result<()> {
    match resolution {
        Some(mm) if mm <= 0 => Err(HubError::validation("Scan resolution must be positive")),
        _ => Ok(()),
    }
}
