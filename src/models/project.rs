//! Project and participant models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project: the unit scans, locations and files are grouped under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Creator of the project
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user taking part in a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    /// Participation role, e.g. `Contributor` or `Viewer`
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Payload accepted when creating a project
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Payload accepted when updating a project
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Payload accepted when adding a participant
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParticipant {
    pub user_id: Option<i64>,
    pub role: Option<String>,
}
