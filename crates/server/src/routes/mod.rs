pub mod groups;
pub mod students;

use axum::routing::get;
use axum::{middleware, Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use common::types::Health;
use service::PageQuery;

use crate::auth::{self, AppState};

/// Query-string paging as the UI sends it: `?pageNumber=2&pageSize=10`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default = "default_page_number")]
    pub page_number: i32,
    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

fn default_page_number() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

impl From<PageParams> for PageQuery {
    fn from(params: PageParams) -> Self {
        PageQuery {
            page_number: params.page_number,
            page_size: params.page_size,
        }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/Groups", get(groups::list).post(groups::create))
        .route("/api/Groups/whole", get(groups::whole))
        .route(
            "/api/Groups/:id",
            get(groups::get_one).put(groups::update).delete(groups::remove),
        )
        .route("/api/Students", get(students::list).post(students::create))
        .route(
            "/api/Students/:id",
            get(students::get_one)
                .put(students::update)
                .delete(students::remove),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
