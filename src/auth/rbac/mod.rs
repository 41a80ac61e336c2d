//! Role-Based Access Control (RBAC) system
//!
//! Attribute-level access control: grant tables map
//! `role -> resource -> action -> attributes`, roles inherit through
//! `$extend`, and a resolved [`Permission`] projects values onto the
//! attributes it grants.

pub mod filter;
pub mod grants;
mod helpers;
mod permissions;
pub mod registry;
mod roles;
mod system;
pub mod types;

// Re-export public types and structs
pub use grants::{GrantsDefinition, RoleDefinition};
pub(crate) use helpers::union_attributes;
pub use permissions::{union_attrs, union_attrs_by_resources, union_attrs_for};
pub use registry::{ExportFormat, ExportView, GrantsRegistry, GrantsSnapshot, ResourceGrants};
pub use system::RbacSystem;
pub use types::{Action, ActionKey, Permission, ResourceTriplet, Rule, Scope};
