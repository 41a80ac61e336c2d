//! Project business service
//!
//! Every operation re-derives the caller's allow-list for the record it
//! touches: payloads are stripped before they reach storage and records
//! are projected before they leave the service.

use crate::auth::rbac::Action;
use crate::auth::types::AuthenticatedUser;
use crate::models::{NewParticipant, NewProject, Participant, Project, ProjectUpdate};
use crate::modules::projects::{PARTICIPANT_ROLES, PARTICIPANTS, PROJECTS};
use crate::storage::database::Database;
use crate::utils::error::{HubError, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use super::sanitizer::AttributeSanitizer;

/// Projects and their participants, guarded per record
#[derive(Debug, Clone)]
pub struct ProjectService {
    database: Arc<Database>,
    sanitizer: AttributeSanitizer,
}

impl ProjectService {
    pub fn new(database: Arc<Database>, sanitizer: AttributeSanitizer) -> Self {
        Self { database, sanitizer }
    }

    /// Read one project
    pub async fn get(&self, user: &AuthenticatedUser, project_id: i64) -> Result<Value> {
        let project = self.require_project(project_id).await?;
        self.project_output(user, &project).await
    }

    /// Every project the caller may read, projected per record
    pub async fn list(&self, user: &AuthenticatedUser) -> Result<Vec<Value>> {
        let records = self
            .database
            .list_projects()
            .await?
            .into_iter()
            .map(|project| Ok((project.id, serde_json::to_value(&project)?)))
            .collect::<Result<Vec<_>>>()?;

        self.sanitizer
            .sanitize_list(user, &PROJECTS, Action::Read, records)
            .await
    }

    /// Create a project owned by the caller
    pub async fn create(&self, user: &AuthenticatedUser, payload: &Value) -> Result<Value> {
        let (_, sanitized) = self
            .sanitizer
            .sanitize_input(user, &PROJECTS, None, Action::Create, payload)
            .await?;
        let new_project: NewProject = serde_json::from_value(sanitized)
            .map_err(|e| HubError::validation(format!("Invalid project: {}", e)))?;
        let name = required_name(new_project.name)?;

        let project = self
            .database
            .create_project(user.id, &name, new_project.description)
            .await?;
        info!("User {} created project {}", user.id, project.id);

        self.project_output(user, &project).await
    }

    /// Update the project fields the caller may write
    pub async fn update(&self, user: &AuthenticatedUser, project_id: i64, payload: &Value) -> Result<Value> {
        let (_, sanitized) = self
            .sanitizer
            .sanitize_input(user, &PROJECTS, Some(project_id), Action::Update, payload)
            .await?;
        let update: ProjectUpdate = serde_json::from_value(sanitized)
            .map_err(|e| HubError::validation(format!("Invalid project update: {}", e)))?;
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(HubError::validation("Project name must not be empty"));
            }
        }

        let project = self
            .database
            .update_project(project_id, update.name, update.description)
            .await?;
        self.project_output(user, &project).await
    }

    /// Delete a project and its participations
    pub async fn delete(&self, user: &AuthenticatedUser, project_id: i64) -> Result<()> {
        self.sanitizer
            .resolver()
            .resolve_for_user(user, Some(project_id), Action::Delete, &PROJECTS)
            .await?;

        if !self.database.delete_project(project_id).await? {
            return Err(HubError::not_found(format!("Project {} not found", project_id)));
        }
        info!("User {} deleted project {}", user.id, project_id);
        Ok(())
    }

    /// Add a participant to a project
    pub async fn add_participant(
        &self,
        user: &AuthenticatedUser,
        project_id: i64,
        payload: &Value,
    ) -> Result<Value> {
        let (_, sanitized) = self
            .sanitizer
            .sanitize_input(user, &PARTICIPANTS, Some(project_id), Action::Create, payload)
            .await?;
        let new_participant: NewParticipant = serde_json::from_value(sanitized)
            .map_err(|e| HubError::validation(format!("Invalid participant: {}", e)))?;

        let user_id = new_participant
            .user_id
            .ok_or_else(|| HubError::validation("Participant userId is required"))?;
        let role = new_participant
            .role
            .ok_or_else(|| HubError::validation("Participant role is required"))?;
        if !PARTICIPANT_ROLES.contains(&role.as_str()) {
            return Err(HubError::validation(format!(
                "Unknown participation role '{}', expected one of {:?}",
                role, PARTICIPANT_ROLES
            )));
        }

        let participant = self.database.add_participant(project_id, user_id, &role).await?;
        info!(
            "User {} added user {} to project {} as {}",
            user.id, user_id, project_id, role
        );

        self.sanitizer
            .sanitize_output(
                user,
                &PARTICIPANTS,
                project_id,
                Action::Read,
                &serde_json::to_value(&participant)?,
            )
            .await
    }

    /// Participants of a project as the caller may see them
    pub async fn participants(&self, user: &AuthenticatedUser, project_id: i64) -> Result<Vec<Value>> {
        let resolved = self
            .sanitizer
            .resolver()
            .resolve_for_user(user, Some(project_id), Action::Read, &PARTICIPANTS)
            .await?;

        let participants: Vec<Participant> = self.database.list_participants(project_id).await?;
        participants
            .iter()
            .map(|participant| Ok(resolved.filter(&serde_json::to_value(participant)?)))
            .collect()
    }

    async fn require_project(&self, project_id: i64) -> Result<Project> {
        self.database
            .find_project(project_id)
            .await?
            .ok_or_else(|| HubError::not_found(format!("Project {} not found", project_id)))
    }

    async fn project_output(&self, user: &AuthenticatedUser, project: &Project) -> Result<Value> {
        self.sanitizer
            .sanitize_output(
                user,
                &PROJECTS,
                project.id,
                Action::Read,
                &serde_json::to_value(project)?,
            )
            .await
    }
}

fn required_name(name: Option<String>) -> Result<String> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(HubError::validation("Project name is required")),
    }
}
