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
                    .table(ProjectParticipants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectParticipants::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProjectParticipants::ProjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProjectParticipants::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ProjectParticipants::Role).string().not_null())
                    .col(
                        ColumnDef::new(ProjectParticipants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_participants_project_id")
                            .from(ProjectParticipants::Table, ProjectParticipants::ProjectId)
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
                    .name("idx_project_participants_project_user")
                    .table(ProjectParticipants::Table)
                    .col(ProjectParticipants::ProjectId)
                    .col(ProjectParticipants::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectParticipants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProjectParticipants {
    Table,
    Id,
    ProjectId,
    UserId,
    Role,
    CreatedAt,
}
