use sea_orm_migration::prelude::*;

mod m20250101_000001_create_projects_table;
mod m20250101_000002_create_project_participants_table;
mod m20250101_000003_create_scan_configs_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_projects_table::Migration),
            Box::new(m20250101_000002_create_project_participants_table::Migration),
            Box::new(m20250101_000003_create_scan_configs_table::Migration),
        ]
    }
}
