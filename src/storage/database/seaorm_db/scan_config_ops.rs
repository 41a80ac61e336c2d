use crate::models::{ScanConfig, ScanConfigUpdate};
use crate::utils::error::{HubError, Result};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, scan_config};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find scan configuration by ID
    pub async fn find_scan_config(&self, scan_config_id: i64) -> Result<Option<ScanConfig>> {
        debug!("Finding scan config by ID: {}", scan_config_id);

        let model = entities::ScanConfig::find_by_id(scan_config_id)
            .one(&self.db)
            .await
            .map_err(HubError::Database)?;

        Ok(model.map(|m| m.to_domain()))
    }

    /// Scan configurations of a project, oldest first
    pub async fn list_scan_configs(&self, project_id: i64) -> Result<Vec<ScanConfig>> {
        let models = entities::ScanConfig::find()
            .filter(scan_config::Column::ProjectId.eq(project_id))
            .order_by_asc(scan_config::Column::Id)
            .all(&self.db)
            .await
            .map_err(HubError::Database)?;

        Ok(models.iter().map(scan_config::Model::to_domain).collect())
    }

    /// Create a scan configuration in `project_id` owned by `owner_id`
    pub async fn create_scan_config(
        &self,
        project_id: i64,
        owner_id: i64,
        name: &str,
        resolution: Option<i32>,
        sensor: Option<String>,
    ) -> Result<ScanConfig> {
        debug!("Creating scan config '{}' in project {} for user {}", name, project_id, owner_id);

        let now = chrono::Utc::now();
        let active_model = scan_config::ActiveModel {
            project_id: Set(project_id),
            owner_id: Set(owner_id),
            name: Set(name.to_string()),
            resolution: Set(resolution),
            sensor: Set(sensor),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(HubError::Database)?;
        Ok(model.to_domain())
    }

    /// Update the given scan configuration fields
    pub async fn update_scan_config(&self, scan_config_id: i64, update: ScanConfigUpdate) -> Result<ScanConfig> {
        debug!("Updating scan config: {}", scan_config_id);

        let mut active: scan_config::ActiveModel = entities::ScanConfig::find_by_id(scan_config_id)
            .one(&self.db)
            .await
            .map_err(HubError::Database)?
            .ok_or_else(|| HubError::not_found(format!("Scan config {} not found", scan_config_id)))?
            .into();

        if let Some(name) = update.name {
            active.name = Set(name);
        }
        if let Some(resolution) = update.resolution {
            active.resolution = Set(Some(resolution));
        }
        if let Some(sensor) = update.sensor {
            active.sensor = Set(Some(sensor));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let model = active.update(&self.db).await.map_err(HubError::Database)?;
        Ok(model.to_domain())
    }

    /// Delete a scan configuration
    pub async fn delete_scan_config(&self, scan_config_id: i64) -> Result<bool> {
        debug!("Deleting scan config: {}", scan_config_id);

        let result = entities::ScanConfig::delete_by_id(scan_config_id)
            .exec(&self.db)
            .await
            .map_err(HubError::Database)?;

        Ok(result.rows_affected > 0)
    }
}
