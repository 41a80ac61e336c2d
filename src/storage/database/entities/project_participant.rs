use crate::models::Participant;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project participant database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "project_participants")]
pub struct Model {
    /// Participation ID
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Project the user participates in
    pub project_id: i64,

    /// Participating user
    pub user_id: i64,

    /// Participation role
    pub role: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,
}

/// Project participant entity relations
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
    pub fn to_domain(&self) -> Participant {
        Participant {
            id: self.id,
            project_id: self.project_id,
            user_id: self.user_id,
            role: self.role.clone(),
            created_at: self.created_at.into(),
        }
    }
}
