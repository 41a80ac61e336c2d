use crate::services::ownership::OwnershipLookup;
use crate::utils::error::{HubError, Result};
use async_trait::async_trait;

use super::types::{PROJECT_ENTITY, SCAN_CONFIG_ENTITY, SeaOrmDatabase};

#[async_trait]
impl OwnershipLookup for SeaOrmDatabase {
    async fn owner_of(&self, entity: &str, id: i64) -> Result<Option<i64>> {
        match entity {
            PROJECT_ENTITY => Ok(self.find_project(id).await?.map(|p| p.owner_id)),
            SCAN_CONFIG_ENTITY => Ok(self.find_scan_config(id).await?.map(|c| c.owner_id)),
            other => Err(HubError::not_found(format!("Unknown entity '{}'", other))),
        }
    }

    /// Scan configurations inherit participation from their project
    async fn participant_role(&self, entity: &str, id: i64, user_id: i64) -> Result<Option<String>> {
        let project_id = match entity {
            PROJECT_ENTITY => id,
            SCAN_CONFIG_ENTITY => match self.find_scan_config(id).await? {
                Some(config) => config.project_id,
                None => return Ok(None),
            },
            other => return Err(HubError::not_found(format!("Unknown entity '{}'", other))),
        };
        Ok(self.find_participant(project_id, user_id).await?.map(|p| p.role))
    }
}
