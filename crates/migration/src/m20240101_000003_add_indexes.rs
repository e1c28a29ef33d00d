//! Indexes for the hot predicates.
//!
//! Name/email uniqueness among live rows gets a partial unique index as
//! the store-level backstop behind the service's check-then-insert; the
//! `WHERE NOT is_deleted` predicate keeps soft-deleted rows out of the
//! constraint so their names and emails stay reusable.
use sea_orm_migration::prelude::*;

use crate::m20240101_000002_create_student::Student;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_groups_name_live ON groups (name) WHERE NOT is_deleted",
            )
            .await?;
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX idx_students_email_live ON students (email) WHERE NOT is_deleted",
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_students_group_id")
                    .table(Student::Table)
                    .col(Student::GroupId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_groups_name_live")
            .await?;
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_students_email_live")
            .await?;
        manager
            .drop_index(Index::drop().name("idx_students_group_id").table(Student::Table).to_owned())
            .await
    }
}
