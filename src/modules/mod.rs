//! Built-in business modules
//!
//! Each module contributes a grant table, plus the entity access of the
//! records the service stores. Grant tables are merged at startup, before
//! any grants file named in the configuration.

pub mod files;
pub mod locations;
pub mod projects;
pub mod roles;
pub mod scans;
pub mod users;

use crate::auth::rbac::RbacSystem;
use crate::config::AclConfig;
use crate::utils::error::Result;
use tracing::info;

/// Grant tables shipped with the service, keyed by module name
pub const BUILTIN_GRANTS: &[(&str, &str)] = &[
    (files::MODULE, files::GRANTS),
    (locations::MODULE, locations::GRANTS),
    (projects::MODULE, projects::GRANTS),
    (roles::MODULE, roles::GRANTS),
    (scans::MODULE, scans::GRANTS),
    (users::MODULE, users::GRANTS),
];

/// Merge every built-in grant table
pub fn register_builtin(rbac: &RbacSystem) -> Result<()> {
    for (module, grants) in BUILTIN_GRANTS {
        rbac.merge_module_yaml(module, grants)?;
    }
    info!(
        "Registered {} built-in grant tables ({} roles)",
        BUILTIN_GRANTS.len(),
        rbac.snapshot().roles().len()
    );
    Ok(())
}

/// Merge the built-in tables, then every grants file the configuration names
pub async fn register_all(rbac: &RbacSystem, acl: &AclConfig) -> Result<()> {
    register_builtin(rbac)?;
    for path in &acl.grants_files {
        rbac.load_grants_file(path).await?;
    }
    Ok(())
}
