use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use super::domain::{CategoryId, EstimatorConfig, Role};
use super::session::{EstimationSession, EstimatorError};

/// Stateless estimate request; every call builds its own session.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub selected: Vec<CategoryId>,
    #[serde(default)]
    pub role: Option<Role>,
}

/// Router builder exposing the category catalog and the estimate endpoint.
pub fn estimator_router(config: Arc<EstimatorConfig>) -> Router {
    Router::new()
        .route("/api/v1/estimator/categories", get(categories_handler))
        .route("/api/v1/estimator/estimate", post(estimate_handler))
        .with_state(config)
}

pub(crate) async fn categories_handler(State(config): State<Arc<EstimatorConfig>>) -> Response {
    let payload = json!({ "categories": config.categories() });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn estimate_handler(
    State(config): State<Arc<EstimatorConfig>>,
    Json(request): Json<EstimateRequest>,
) -> Response {
    let mut session = EstimationSession::new(config);
    for id in &request.selected {
        session.toggle_category(id, true);
    }
    session.set_role(request.role);

    match session.estimate() {
        Ok(result) => {
            info!(
                categories = result.line_items.len(),
                midpoint = result.midpoint,
                "savings estimate served"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(EstimatorError::Precondition(err)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(EstimatorError::Valuation(err)) => {
            error!(error = %err, "estimator catalog is malformed");
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
