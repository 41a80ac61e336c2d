// Module declarations
mod connection;
mod ownership_ops;
mod project_ops;
mod scan_config_ops;
mod types;

// Re-export public types
pub use types::{DatabaseBackendType, PROJECT_ENTITY, SCAN_CONFIG_ENTITY, SeaOrmDatabase};
