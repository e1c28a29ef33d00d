//! Create `students` table with nullable FK to `groups`.
//!
//! `group_id` stays nullable: a student may be unassigned. Soft delete is a
//! flag plus timestamp bump, never a row removal.
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240101_000001_create_group::Group;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(pk_auto(Student::Id))
                    .col(string_len(Student::FirstName, 64).not_null())
                    .col(string_len(Student::LastName, 64).not_null())
                    .col(string_len(Student::Email, 255).not_null())
                    .col(string_len(Student::Phone, 32).not_null())
                    .col(string_len(Student::Address, 255).not_null())
                    .col(date(Student::BirthDate).not_null())
                    .col(ColumnDef::new(Student::Image).string_len(255).null())
                    .col(ColumnDef::new(Student::GroupId).integer().null())
                    .col(boolean(Student::IsDeleted).not_null().default(false))
                    .col(timestamp_with_time_zone(Student::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Student::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_group")
                            .from(Student::Table, Student::GroupId)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Student {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    BirthDate,
    Image,
    GroupId,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}
