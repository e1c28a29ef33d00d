//! Create `groups` table.
//!
//! No unique constraint on the column itself: uniqueness holds only
//! among live rows and is backed by a partial index added in the index
//! migration.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Group::Table)
                    .if_not_exists()
                    .col(pk_auto(Group::Id))
                    .col(string_len(Group::Name, 64).not_null())
                    .col(integer(Group::Limit).not_null())
                    .col(boolean(Group::IsDeleted).not_null().default(false))
                    .col(timestamp_with_time_zone(Group::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Group::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Group::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Group {
    #[sea_orm(iden = "groups")]
    Table,
    Id,
    Name,
    Limit,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}
