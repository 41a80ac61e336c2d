//! Projects module: projects and their participants

use crate::auth::rbac::ResourceTriplet;
use crate::services::ownership::EntityAccess;

pub const MODULE: &str = "projects";

/// Participation role of a user who may edit a project
pub const CONTRIBUTOR: &str = "Contributor";
/// Participation role of a user who may only look at a project
pub const VIEWER: &str = "Viewer";

/// Participation roles a project accepts
pub const PARTICIPANT_ROLES: &[&str] = &[CONTRIBUTOR, VIEWER];

/// Every participant reads a shared project; only contributors write to it
pub const PROJECTS: EntityAccess = EntityAccess::new(
    "project",
    ResourceTriplet::new("project", "ownProject").with_shared("sharedProject"),
)
.qualifying_writes(&[CONTRIBUTOR]);

/// Participants are guarded through their project
pub const PARTICIPANTS: EntityAccess = EntityAccess::new(
    "project",
    ResourceTriplet::new("projectParticipant", "ownProjectParticipant")
        .with_shared("sharedProjectParticipant"),
);

pub const GRANTS: &str = r#"
BasicUser:
  project:
    create:any: [name, description]
  ownProject:
    read:own: ["*"]
    update:own: [name, description]
    delete:own: ["*"]
  sharedProject:
    read:own: [id, name, description, ownerId, createdAt, updatedAt]
    update:own: [description]
  ownProjectParticipant:
    create:own: [userId, role]
    read:own: ["*"]
  sharedProjectParticipant:
    read:own: [userId, role]
Admin:
  project:
    read:any: ["*"]
    update:any: ["*", "!id", "!ownerId", "!createdAt"]
    delete:any: ["*"]
  projectParticipant:
    create:any: [userId, role]
    read:any: ["*"]
"#;
