use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::{AnswerSource, AssistantService};

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    pub message: String,
}

/// Router builder exposing the chat endpoint.
pub fn assistant_router<S>(service: Arc<AssistantService<S>>) -> Router
where
    S: AnswerSource + 'static,
{
    Router::new()
        .route("/api/v1/assistant/messages", post(message_handler::<S>))
        .with_state(service)
}

pub(crate) async fn message_handler<S>(
    State(service): State<Arc<AssistantService<S>>>,
    Json(request): Json<AssistantMessage>,
) -> Response
where
    S: AnswerSource + 'static,
{
    match service.ask(&request.message).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
