use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, student};
use common::types::{GroupDetail, GroupListItem, GroupOption};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Enrollment capacity; never below the current non-deleted student count.
    pub limit: i32,
    pub is_deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Students,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Students => Entity::has_many(student::Entity).into(),
        }
    }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if trimmed.len() > 64 {
        return Err(errors::ModelError::Validation("name too long (max 64)".into()));
    }
    Ok(())
}

pub fn validate_limit(limit: i32) -> Result<(), errors::ModelError> {
    if limit < 0 {
        return Err(errors::ModelError::Validation("limit must be >= 0".into()));
    }
    Ok(())
}

/// Fresh row for insertion; id is assigned by the store.
pub fn new_active(name: &str, limit: i32) -> ActiveModel {
    use sea_orm::ActiveValue::{NotSet, Set};
    let now = Utc::now().into();
    ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        limit: Set(limit),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

impl From<Model> for GroupListItem {
    fn from(m: Model) -> Self {
        Self { id: m.id, name: m.name, limit: m.limit }
    }
}

impl From<Model> for GroupDetail {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            limit: m.limit,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}

impl From<Model> for GroupOption {
    fn from(m: Model) -> Self {
        Self { id: m.id, name: m.name }
    }
}
