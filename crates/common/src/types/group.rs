use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload for `POST /api/Groups` and `PUT /api/Groups/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCreateRequest {
    pub name: String,
    pub limit: i32,
}

/// Row shape of the paginated group listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupListItem {
    pub id: i32,
    pub name: String,
    pub limit: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
    pub id: i32,
    pub name: String,
    pub limit: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal `{id, name}` pair served by `GET /api/Groups/whole` for
/// selection widgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOption {
    pub id: i32,
    pub name: String,
}
