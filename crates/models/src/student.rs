use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, group};
use common::types::{StudentDetail, StudentFields, StudentListItem};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub birth_date: Date,
    /// Stored blob name of the uploaded photo, if any.
    pub image: Option<String>,
    pub group_id: Option<i32>,
    pub is_deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Group,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Group => Entity::belongs_to(group::Entity)
                .from(Column::GroupId)
                .to(group::Column::Id)
                .into(),
        }
    }
}

impl Related<group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_names(first_name: &str, last_name: &str) -> Result<(), errors::ModelError> {
    if first_name.trim().is_empty() {
        return Err(errors::ModelError::Validation("first name required".into()));
    }
    if last_name.trim().is_empty() {
        return Err(errors::ModelError::Validation("last name required".into()));
    }
    Ok(())
}

/// Fresh row for insertion; id is assigned by the store.
pub fn new_active(fields: &StudentFields, image: Option<String>) -> ActiveModel {
    use sea_orm::ActiveValue::{NotSet, Set};
    let now = Utc::now().into();
    ActiveModel {
        id: NotSet,
        first_name: Set(fields.first_name.clone()),
        last_name: Set(fields.last_name.clone()),
        email: Set(fields.email.clone()),
        phone: Set(fields.phone.clone()),
        address: Set(fields.address.clone()),
        birth_date: Set(fields.birth_date),
        image: Set(image),
        group_id: Set(fields.group_id),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

impl Model {
    /// Overwrite the writable fields from an update payload. Image and
    /// soft-delete state are managed separately.
    pub fn apply_fields(&mut self, fields: &StudentFields) {
        self.first_name = fields.first_name.clone();
        self.last_name = fields.last_name.clone();
        self.email = fields.email.clone();
        self.phone = fields.phone.clone();
        self.address = fields.address.clone();
        self.birth_date = fields.birth_date;
        self.group_id = fields.group_id;
        self.updated_at = Utc::now().into();
    }
}

impl From<Model> for StudentListItem {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            group_id: m.group_id,
            image: m.image,
        }
    }
}

impl From<Model> for StudentDetail {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            phone: m.phone,
            address: m.address,
            birth_date: m.birth_date,
            group_id: m.group_id,
            image: m.image,
            created_at: m.created_at.into(),
            updated_at: m.updated_at.into(),
        }
    }
}
