use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::catalog::CATEGORY_CATALOG;
use super::library::{ContentError, ContentLibrary};

/// Router builder exposing category pages and landing-page stats.
pub fn content_router(library: Arc<ContentLibrary>) -> Router {
    Router::new()
        .route("/api/v1/content/categories", get(catalog_handler))
        .route("/api/v1/content/categories/:slug", get(category_handler))
        .route("/api/v1/content/stats", get(stats_handler))
        .with_state(library)
}

pub(crate) async fn catalog_handler() -> Response {
    let payload = json!({ "categories": CATEGORY_CATALOG });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn category_handler(
    State(library): State<Arc<ContentLibrary>>,
    Path(slug): Path<String>,
) -> Response {
    match library.category(&slug) {
        Ok(content) => (StatusCode::OK, Json(content)).into_response(),
        Err(err) => content_error_response(err),
    }
}

pub(crate) async fn stats_handler(State(library): State<Arc<ContentLibrary>>) -> Response {
    match library.stats() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(err) => content_error_response(err),
    }
}

fn content_error_response(err: ContentError) -> Response {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        error!(error = %err, "content document unreadable");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
