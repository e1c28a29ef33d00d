mod support;

use axum::http::{Method, StatusCode};

use support::{app, assert_envelope, body_json, multipart_body, send_json, send_multipart, token};

fn ada_fields(group_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("FirstName", "Ada".to_string()),
        ("LastName", "Lovelace".to_string()),
        ("Email", "ada@example.com".to_string()),
        ("Phone", "555-0100".to_string()),
        ("Address", "12 Analytical St".to_string()),
        ("BirthDate", "1815-12-10".to_string()),
        ("GroupId", group_id.to_string()),
    ]
}

fn as_pairs<'a>(fields: &'a [(&'static str, String)]) -> Vec<(&'a str, &'a str)> {
    fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
}

#[tokio::test]
async fn create_student_from_multipart() {
    let (app, db) = app();
    let token = token();
    let group = db.insert_group("A1", 25);

    let fields = ada_fields(&group.id.to_string());
    let body = multipart_body(&as_pairs(&fields), None);
    let created = send_multipart(&app, Method::POST, "/api/Students", Some(&token), body).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["id"].as_i64().unwrap();

    let fetched = send_json(
        &app,
        Method::GET,
        &format!("/api/Students/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let detail = body_json(fetched).await;
    assert_eq!(detail["email"], "ada@example.com");
    assert_eq!(detail["birthDate"], "1815-12-10");
    assert_eq!(detail["groupId"], group.id);
    assert!(detail["image"].is_null());
}

#[tokio::test]
async fn photo_part_is_stored() {
    let (app, db) = app();
    let token = token();
    let group = db.insert_group("A1", 25);

    let fields = ada_fields(&group.id.to_string());
    let body = multipart_body(&as_pairs(&fields), Some(("ada.png", b"fake-png-bytes")));
    let created = send_multipart(&app, Method::POST, "/api/Students", Some(&token), body).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["id"].as_i64().unwrap();

    let detail = body_json(
        send_json(
            &app,
            Method::GET,
            &format!("/api/Students/{id}"),
            Some(&token),
            None,
        )
        .await,
    )
    .await;
    let image = detail["image"].as_str().unwrap();
    assert!(image.ends_with("ada.png"));
}

#[tokio::test]
async fn blank_group_field_means_unassigned() {
    let (app, _) = app();
    let token = token();

    let fields = ada_fields("");
    let body = multipart_body(&as_pairs(&fields), None);
    let created = send_multipart(&app, Method::POST, "/api/Students", Some(&token), body).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["id"].as_i64().unwrap();

    let detail = body_json(
        send_json(
            &app,
            Method::GET,
            &format!("/api/Students/{id}"),
            Some(&token),
            None,
        )
        .await,
    )
    .await;
    assert!(detail["groupId"].is_null());
}

#[tokio::test]
async fn unknown_group_is_a_field_error() {
    let (app, _) = app();
    let fields = ada_fields("42");
    let body = multipart_body(&as_pairs(&fields), None);
    let resp = send_multipart(&app, Method::POST, "/api/Students", Some(&token()), body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "groupId");
    assert_eq!(body["errors"][0]["message"], "Group not found");
}

#[tokio::test]
async fn missing_birth_date_is_rejected() {
    let (app, _) = app();
    let mut fields = ada_fields("");
    fields.retain(|(name, _)| *name != "BirthDate");
    let body = multipart_body(&as_pairs(&fields), None);
    let resp = send_multipart(&app, Method::POST, "/api/Students", Some(&token()), body).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "birthDate");
}

#[tokio::test]
async fn duplicate_email_maps_to_field_error() {
    let (app, db) = app();
    let token = token();
    let group = db.insert_group("A1", 25);

    let fields = ada_fields(&group.id.to_string());
    let first = multipart_body(&as_pairs(&fields), None);
    let resp = send_multipart(&app, Method::POST, "/api/Students", Some(&token), first).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let again = multipart_body(&as_pairs(&fields), None);
    let resp = send_multipart(&app, Method::POST, "/api/Students", Some(&token), again).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "email");
}

#[tokio::test]
async fn update_replaces_fields_and_keeps_image_without_new_photo() {
    let (app, db) = app();
    let token = token();
    let group = db.insert_group("A1", 25);

    let fields = ada_fields(&group.id.to_string());
    let body = multipart_body(&as_pairs(&fields), Some(("ada.png", b"v1")));
    let created = send_multipart(&app, Method::POST, "/api/Students", Some(&token), body).await;
    let id = body_json(created).await["id"].as_i64().unwrap();

    let mut updated_fields = ada_fields(&group.id.to_string());
    for (name, value) in &mut updated_fields {
        if *name == "Phone" {
            *value = "555-0199".to_string();
        }
    }
    let body = multipart_body(&as_pairs(&updated_fields), None);
    let resp = send_multipart(
        &app,
        Method::PUT,
        &format!("/api/Students/{id}"),
        Some(&token),
        body,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let detail = body_json(
        send_json(
            &app,
            Method::GET,
            &format!("/api/Students/{id}"),
            Some(&token),
            None,
        )
        .await,
    )
    .await;
    assert_eq!(detail["phone"], "555-0199");
    assert!(detail["image"].as_str().unwrap().ends_with("ada.png"));
}

#[tokio::test]
async fn delete_then_fetch_is_404() {
    let (app, db) = app();
    let token = token();
    let group = db.insert_group("A1", 25);
    let fields: common::types::StudentFields = serde_json::from_value(serde_json::json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "phone": "555-0100",
        "address": "12 Analytical St",
        "birthDate": "1815-12-10",
        "groupId": group.id,
    }))
    .unwrap();
    let student = db.insert_student(&fields, None);

    let deleted = send_json(
        &app,
        Method::DELETE,
        &format!("/api/Students/{}", student.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = send_json(
        &app,
        Method::GET,
        &format!("/api/Students/{}", student.id),
        Some(&token),
        None,
    )
    .await;
    assert_envelope(gone, StatusCode::NOT_FOUND, "Student not found").await;
}
