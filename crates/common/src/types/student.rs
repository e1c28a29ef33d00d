use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The writable student fields, shared by create and update.
///
/// On the wire these travel as multipart form fields (`FirstName`,
/// `LastName`, ... see `client::forms`); as JSON they use camelCase, which
/// lets a detail response deserialize straight into this shape for form
/// re-population.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub birth_date: NaiveDate,
    pub group_id: Option<i32>,
}

/// Row shape of the paginated student listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListItem {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub group_id: Option<i32>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetail {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub birth_date: NaiveDate,
    pub group_id: Option<i32>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
