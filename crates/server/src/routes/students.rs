use axum::extract::multipart::Multipart;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;

use common::types::{CreatedResponse, Paged, StudentDetail, StudentFields, StudentListItem};
use service::PhotoUpload;

use crate::auth::AppState;
use crate::errors::ApiError;
use crate::routes::PageParams;

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Paged<StudentListItem>>, ApiError> {
    Ok(Json(state.students.get_all(params.into()).await?))
}

pub async fn create(
    State(state): State<AppState>,
    form: Multipart,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let (fields, photo) = read_student_form(form).await?;
    let id = state.students.create(&fields, photo).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentDetail>, ApiError> {
    Ok(Json(state.students.get_by_id(id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    form: Multipart,
) -> Result<StatusCode, ApiError> {
    let (fields, photo) = read_student_form(form).await?;
    state.students.update(id, &fields, photo).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Collect the `multipart/form-data` student form. Field names follow
/// the UI contract exactly, unknown parts are skipped. An empty photo
/// part counts as no upload.
async fn read_student_form(
    mut form: Multipart,
) -> Result<(StudentFields, Option<PhotoUpload>), ApiError> {
    let mut first_name = String::new();
    let mut last_name = String::new();
    let mut email = String::new();
    let mut phone = String::new();
    let mut address = String::new();
    let mut birth_date: Option<NaiveDate> = None;
    let mut group_id: Option<i32> = None;
    let mut photo: Option<PhotoUpload> = None;

    while let Some(field) = form
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(format!("Malformed form data: {err}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "Photo" {
            let file_name = field.file_name().unwrap_or("photo").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ApiError::bad_request(format!("Malformed form data: {err}")))?;
            if !bytes.is_empty() {
                photo = Some(PhotoUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|err| ApiError::bad_request(format!("Malformed form data: {err}")))?;
        match name.as_str() {
            "FirstName" => first_name = text,
            "LastName" => last_name = text,
            "Email" => email = text,
            "Phone" => phone = text,
            "Address" => address = text,
            "BirthDate" => birth_date = Some(parse_birth_date(&text)?),
            "GroupId" => group_id = parse_group_id(&text)?,
            _ => {}
        }
    }

    let birth_date = birth_date
        .ok_or_else(|| ApiError::bad_field("birthDate", "Birth date is required"))?;

    Ok((
        StudentFields {
            first_name,
            last_name,
            email,
            phone,
            address,
            birth_date,
            group_id,
        },
        photo,
    ))
}

fn parse_birth_date(raw: &str) -> Result<NaiveDate, ApiError> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    // Date pickers often submit a full timestamp.
    if let Ok(stamp) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(stamp.date_naive());
    }
    Err(ApiError::bad_field(
        "birthDate",
        format!("Unrecognized date: {raw}"),
    ))
}

fn parse_group_id(raw: &str) -> Result<Option<i32>, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i32>()
        .map(Some)
        .map_err(|_| ApiError::bad_field("groupId", format!("Invalid group id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn birth_date_accepts_plain_and_rfc3339() {
        let plain = parse_birth_date("2001-05-14").unwrap();
        let stamped = parse_birth_date("2001-05-14T00:00:00Z").unwrap();
        assert_eq!(plain, stamped);
    }

    #[test]
    fn birth_date_rejects_garbage() {
        assert!(parse_birth_date("14/05/2001").is_err());
    }

    #[test]
    fn group_id_blank_means_unassigned() {
        assert_eq!(parse_group_id("").unwrap(), None);
        assert_eq!(parse_group_id("  ").unwrap(), None);
        assert_eq!(parse_group_id("7").unwrap(), Some(7));
        assert!(parse_group_id("seven").is_err());
    }
}
