//! Scan configuration models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capture settings for one scanning run within a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfig {
    pub id: i64,
    pub project_id: i64,
    /// Creator of the configuration
    pub owner_id: i64,
    pub name: String,
    /// Point spacing in millimetres
    pub resolution: Option<i32>,
    /// Sensor model, e.g. `lidar-vlp16`
    pub sensor: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload accepted when creating a scan configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScanConfig {
    pub name: Option<String>,
    pub resolution: Option<i32>,
    pub sensor: Option<String>,
}

/// Payload accepted when updating a scan configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanConfigUpdate {
    pub name: Option<String>,
    pub resolution: Option<i32>,
    pub sensor: Option<String>,
}
