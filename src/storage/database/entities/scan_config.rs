use crate::models::ScanConfig;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Scan configuration database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "scan_configs")]
pub struct Model {
    /// Scan configuration ID
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Project the configuration belongs to
    pub project_id: i64,

    /// Creating user
    pub owner_id: i64,

    /// Display name
    pub name: String,

    /// Point spacing in millimetres
    pub resolution: Option<i32>,

    /// Sensor model
    pub sensor: Option<String>,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

/// Scan configuration entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to project relation
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to the domain model
    pub fn to_domain(&self) -> ScanConfig {
        ScanConfig {
            id: self.id,
            project_id: self.project_id,
            owner_id: self.owner_id,
            name: self.name.clone(),
            resolution: self.resolution,
            sensor: self.sensor.clone(),
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}
