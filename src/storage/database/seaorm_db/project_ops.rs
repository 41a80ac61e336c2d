use crate::models::{Participant, Project};
use crate::utils::error::{HubError, Result};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, project, project_participant, scan_config};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Find project by ID
    pub async fn find_project(&self, project_id: i64) -> Result<Option<Project>> {
        debug!("Finding project by ID: {}", project_id);

        let model = entities::Project::find_by_id(project_id)
            .one(&self.db)
            .await
            .map_err(HubError::Database)?;

        Ok(model.map(|m| m.to_domain()))
    }

    /// List all projects, oldest first
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let models = entities::Project::find()
            .order_by_asc(project::Column::Id)
            .all(&self.db)
            .await
            .map_err(HubError::Database)?;

        Ok(models.iter().map(project::Model::to_domain).collect())
    }

    /// Create a project owned by `owner_id`
    pub async fn create_project(
        &self,
        owner_id: i64,
        name: &str,
        description: Option<String>,
    ) -> Result<Project> {
        debug!("Creating project '{}' for user {}", name, owner_id);

        let now = chrono::Utc::now();
        let active_model = project::ActiveModel {
            name: Set(name.to_string()),
            description: Set(description),
            owner_id: Set(owner_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(HubError::Database)?;
        Ok(model.to_domain())
    }

    /// Update the given project fields
    pub async fn update_project(
        &self,
        project_id: i64,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Project> {
        debug!("Updating project: {}", project_id);

        let mut active: project::ActiveModel = entities::Project::find_by_id(project_id)
            .one(&self.db)
            .await
            .map_err(HubError::Database)?
            .ok_or_else(|| HubError::not_found(format!("Project {} not found", project_id)))?
            .into();

        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(description) = description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(chrono::Utc::now().into());

        let model = active.update(&self.db).await.map_err(HubError::Database)?;
        Ok(model.to_domain())
    }

    /// Delete a project with its participations and scan configurations
    pub async fn delete_project(&self, project_id: i64) -> Result<bool> {
        debug!("Deleting project: {}", project_id);

        let txn = self.db.begin().await.map_err(HubError::Database)?;
        entities::ScanConfig::delete_many()
            .filter(scan_config::Column::ProjectId.eq(project_id))
            .exec(&txn)
            .await
            .map_err(HubError::Database)?;
        entities::ProjectParticipant::delete_many()
            .filter(project_participant::Column::ProjectId.eq(project_id))
            .exec(&txn)
            .await
            .map_err(HubError::Database)?;
        let result = entities::Project::delete_by_id(project_id)
            .exec(&txn)
            .await
            .map_err(HubError::Database)?;
        txn.commit().await.map_err(HubError::Database)?;

        Ok(result.rows_affected > 0)
    }

    /// Register `user_id` as a participant of a project
    pub async fn add_participant(&self, project_id: i64, user_id: i64, role: &str) -> Result<Participant> {
        debug!("Adding user {} to project {} as {}", user_id, project_id, role);

        if self.find_participant(project_id, user_id).await?.is_some() {
            return Err(HubError::conflict(format!(
                "User {} already participates in project {}",
                user_id, project_id
            )));
        }

        let active_model = project_participant::ActiveModel {
            project_id: Set(project_id),
            user_id: Set(user_id),
            role: Set(role.to_string()),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(HubError::Database)?;
        Ok(model.to_domain())
    }

    /// Participation of `user_id` in a project, if any
    pub async fn find_participant(&self, project_id: i64, user_id: i64) -> Result<Option<Participant>> {
        let model = entities::ProjectParticipant::find()
            .filter(project_participant::Column::ProjectId.eq(project_id))
            .filter(project_participant::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(HubError::Database)?;

        Ok(model.map(|m| m.to_domain()))
    }

    /// Participants of a project
    pub async fn list_participants(&self, project_id: i64) -> Result<Vec<Participant>> {
        let models = entities::ProjectParticipant::find()
            .filter(project_participant::Column::ProjectId.eq(project_id))
            .order_by_asc(project_participant::Column::Id)
            .all(&self.db)
            .await
            .map_err(HubError::Database)?;

        Ok(models.iter().map(project_participant::Model::to_domain).collect())
    }
}
