use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use common::types::{
    CreatedResponse, GroupCreateRequest, GroupDetail, GroupListItem, GroupOption, Paged,
};

use crate::auth::AppState;
use crate::errors::ApiError;
use crate::routes::PageParams;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Paged<GroupListItem>>, ApiError> {
    Ok(Json(state.groups.get_all(params.into()).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<GroupCreateRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = state.groups.create(&input).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Unpaged list of live groups for dropdowns on the student form.
pub async fn whole(State(state): State<AppState>) -> Result<Json<Vec<GroupOption>>, ApiError> {
    Ok(Json(state.groups.get_whole().await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GroupDetail>, ApiError> {
    Ok(Json(state.groups.get_by_id(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<GroupCreateRequest>,
) -> Result<StatusCode, ApiError> {
    state.groups.update(id, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.groups.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
