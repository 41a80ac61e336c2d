use sea_orm::DatabaseConnection;

/// SeaORM-based database implementation
#[derive(Debug)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

/// Entity name under which projects are looked up for ownership
pub const PROJECT_ENTITY: &str = "project";

/// Entity name under which scan configurations are looked up for ownership
pub const SCAN_CONFIG_ENTITY: &str = "scanConfig";
