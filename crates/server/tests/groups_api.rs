mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;

use support::{app, assert_envelope, body_json, send_json, token};

#[tokio::test]
async fn health_needs_no_token() {
    let (app, _) = app();
    let resp = send_json(&app, Method::GET, "/health", None, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

#[tokio::test]
async fn api_rejects_missing_token() {
    let (app, _) = app();
    let resp = send_json(&app, Method::GET, "/api/Groups", None, None).await;
    assert_envelope(resp, StatusCode::UNAUTHORIZED, "Missing credentials").await;
}

#[tokio::test]
async fn api_rejects_garbage_token() {
    let (app, _) = app();
    let resp = send_json(&app, Method::GET, "/api/Groups", Some("not-a-jwt"), None).await;
    assert_envelope(resp, StatusCode::UNAUTHORIZED, "Invalid or expired token").await;
}

#[tokio::test]
async fn bearer_prefix_is_optional() {
    let (app, _) = app();
    let token = token();

    let bare = send_json(&app, Method::GET, "/api/Groups", Some(&token), None).await;
    assert_eq!(bare.status(), StatusCode::OK);

    let prefixed = format!("Bearer {token}");
    let with_prefix = send_json(&app, Method::GET, "/api/Groups", Some(&prefixed), None).await;
    assert_eq!(with_prefix.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_then_fetch_group() {
    let (app, _) = app();
    let token = token();

    let created = send_json(
        &app,
        Method::POST,
        "/api/Groups",
        Some(&token),
        Some(json!({"name": "A1", "limit": 25})),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["id"].as_i64().unwrap();

    let fetched = send_json(
        &app,
        Method::GET,
        &format!("/api/Groups/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let detail = body_json(fetched).await;
    assert_eq!(detail["name"], "A1");
    assert_eq!(detail["limit"], 25);
    assert!(detail["createdAt"].is_string());
}

#[tokio::test]
async fn duplicate_name_maps_to_field_error() {
    let (app, db) = app();
    let token = token();
    db.insert_group("B2", 20);

    let resp = send_json(
        &app,
        Method::POST,
        "/api/Groups",
        Some(&token),
        Some(json!({"name": "B2", "limit": 10})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "name");
    assert_eq!(body["errors"][0]["message"], "Duplicate name value");
}

#[tokio::test]
async fn missing_group_is_404_envelope() {
    let (app, _) = app();
    let resp = send_json(&app, Method::GET, "/api/Groups/99", Some(&token()), None).await;
    assert_envelope(resp, StatusCode::NOT_FOUND, "Group not found").await;
}

#[tokio::test]
async fn listing_pages_and_counts() {
    let (app, db) = app();
    let token = token();
    for name in ["A1", "B2", "C3"] {
        db.insert_group(name, 30);
    }

    let page = send_json(
        &app,
        Method::GET,
        "/api/Groups?pageNumber=2&pageSize=2",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(page.status(), StatusCode::OK);
    let body = body_json(page).await;
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["name"], "C3");
}

#[tokio::test]
async fn zero_page_size_is_rejected() {
    let (app, _) = app();
    let resp = send_json(
        &app,
        Method::GET,
        "/api/Groups?pageNumber=1&pageSize=0",
        Some(&token()),
        None,
    )
    .await;
    assert_envelope(resp, StatusCode::BAD_REQUEST, "Invalid parameters for paging").await;
}

#[tokio::test]
async fn whole_lists_id_name_pairs() {
    let (app, db) = app();
    db.insert_group("A1", 25);
    db.insert_group("B2", 20);

    let resp = send_json(&app, Method::GET, "/api/Groups/whole", Some(&token()), None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let options = body.as_array().unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0]["name"], "A1");
    assert!(options[0].get("limit").is_none());
}

#[tokio::test]
async fn update_and_delete_return_no_content() {
    let (app, db) = app();
    let token = token();
    let group = db.insert_group("A1", 25);

    let updated = send_json(
        &app,
        Method::PUT,
        &format!("/api/Groups/{}", group.id),
        Some(&token),
        Some(json!({"name": "A1-renamed", "limit": 30})),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::NO_CONTENT);

    let deleted = send_json(
        &app,
        Method::DELETE,
        &format!("/api/Groups/{}", group.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = send_json(
        &app,
        Method::GET,
        &format!("/api/Groups/{}", group.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}
