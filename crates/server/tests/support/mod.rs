use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::auth::{AppState, AuthSettings};
use server::routes;
use service::{
    GroupService, MemoryBlobStore, MemoryDb, MemoryGroupRepository, MemoryStudentRepository,
    StudentService,
};

pub const JWT_SECRET: &str = "unit-test-secret";

/// Router over the in-memory repositories, plus the shared database
/// handle for direct state inspection.
pub fn app() -> (Router, Arc<MemoryDb>) {
    let db = MemoryDb::shared();
    let groups = Arc::new(MemoryGroupRepository::new(db.clone()));
    let students = Arc::new(MemoryStudentRepository::new(db.clone()));
    let state = AppState {
        groups: GroupService::new(groups.clone()),
        students: StudentService::new(students, groups, Arc::new(MemoryBlobStore::new())),
        auth: AuthSettings {
            jwt_secret: JWT_SECRET.to_string(),
        },
    };
    (routes::build_router(state, CorsLayer::very_permissive()), db)
}

#[derive(Serialize)]
struct Claims {
    sub: String,
    exp: usize,
}

pub fn token() -> String {
    let claims = Claims {
        sub: "tester".to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(token) = auth {
        req = req.header(header::AUTHORIZATION, token);
    }
    let req = match body {
        Some(json) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn assert_envelope(resp: Response, status: StatusCode, message: &str) {
    assert_eq!(resp.status(), status);
    let body = body_json(resp).await;
    assert_eq!(body["message"], message);
}

pub const BOUNDARY: &str = "x-test-boundary";

/// Hand-rolled multipart body matching what the student form submits.
pub fn multipart_body(text_fields: &[(&str, &str)], photo: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in text_fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = photo {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"Photo\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn send_multipart(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Vec<u8>,
) -> Response {
    let mut req = Request::builder().method(method).uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(token) = auth {
        req = req.header(header::AUTHORIZATION, token);
    }
    app.clone()
        .oneshot(req.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}
