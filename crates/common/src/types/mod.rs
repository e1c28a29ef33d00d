use serde::{Deserialize, Serialize};

pub mod error;
pub mod group;
pub mod page;
pub mod student;

pub use error::{ErrorResponse, FieldError};
pub use group::{GroupCreateRequest, GroupDetail, GroupListItem, GroupOption};
pub use page::Paged;
pub use student::{StudentDetail, StudentFields, StudentListItem};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body of a successful create: the identifier assigned by the store.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedResponse {
    pub id: i32,
}
