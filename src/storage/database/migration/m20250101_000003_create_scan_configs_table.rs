use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_projects_table::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScanConfigs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScanConfigs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScanConfigs::ProjectId).big_integer().not_null())
                    .col(ColumnDef::new(ScanConfigs::OwnerId).big_integer().not_null())
                    .col(ColumnDef::new(ScanConfigs::Name).string().not_null())
                    .col(ColumnDef::new(ScanConfigs::Resolution).integer().null())
                    .col(ColumnDef::new(ScanConfigs::Sensor).string().null())
                    .col(
                        ColumnDef::new(ScanConfigs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ScanConfigs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scan_configs_project_id")
                            .from(ScanConfigs::Table, ScanConfigs::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scan_configs_project_id")
                    .table(ScanConfigs::Table)
                    .col(ScanConfigs::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScanConfigs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ScanConfigs {
    Table,
    Id,
    ProjectId,
    OwnerId,
    Name,
    Resolution,
    Sensor,
    CreatedAt,
    UpdatedAt,
}
