//! # scanhub
//!
//! Attribute-level access control for the scanhub project service.
//!
//! Modules declare grant tables (`role -> resource -> action:scope ->
//! attributes`). The tables are merged into an immutable, lock-free
//! snapshot that answers `can(roles, resource, action)` with the attribute
//! allow-list the roles hold. Requests are guarded per operation and their
//! JSON responses are projected onto that allow-list; records with an owner
//! or participants are resolved through global, owned and shared resources.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scanhub::auth::rbac::{Action, RbacSystem};
//!
//! # fn main() -> scanhub::Result<()> {
//! let rbac = RbacSystem::new();
//! rbac.merge_module_yaml("users", "BasicUser:\n  ownUser:\n    read:own: [id, name]\n")?;
//!
//! let permission = rbac.can(&["BasicUser"], "ownUser", Action::Read);
//! assert!(permission.granted);
//! assert_eq!(permission.attributes, vec!["id", "name"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Server Mode
//!
//! ```rust,no_run
//! use scanhub::{Config, server::run_server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/scanhub.yaml").await?;
//!     run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod models;
pub mod modules;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::rbac::{Action, Permission, RbacSystem};
pub use config::Config;
pub use utils::error::{HubError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
