use crate::assistant::AssistantError;
use crate::config::ConfigError;
use crate::content::ContentError;
use crate::estimator::{EstimatorConfigError, EstimatorError, UnknownRole};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    EstimatorConfig(EstimatorConfigError),
    Estimator(EstimatorError),
    Role(UnknownRole),
    Content(ContentError),
    Assistant(AssistantError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::EstimatorConfig(err) => write!(f, "estimator config error: {}", err),
            AppError::Estimator(err) => write!(f, "estimate error: {}", err),
            AppError::Role(err) => write!(f, "invalid role: {}", err),
            AppError::Content(err) => write!(f, "content error: {}", err),
            AppError::Assistant(err) => write!(f, "assistant error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::EstimatorConfig(err) => Some(err),
            AppError::Estimator(err) => Some(err),
            AppError::Role(err) => Some(err),
            AppError::Content(err) => Some(err),
            AppError::Assistant(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Estimator(EstimatorError::Precondition(_))
            | AppError::Role(_)
            | AppError::Assistant(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Content(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::EstimatorConfig(_)
            | AppError::Estimator(EstimatorError::Valuation(_))
            | AppError::Content(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<EstimatorConfigError> for AppError {
    fn from(value: EstimatorConfigError) -> Self {
        Self::EstimatorConfig(value)
    }
}

impl From<EstimatorError> for AppError {
    fn from(value: EstimatorError) -> Self {
        Self::Estimator(value)
    }
}

impl From<UnknownRole> for AppError {
    fn from(value: UnknownRole) -> Self {
        Self::Role(value)
    }
}

impl From<ContentError> for AppError {
    fn from(value: ContentError) -> Self {
        Self::Content(value)
    }
}

impl From<AssistantError> for AppError {
    fn from(value: AssistantError) -> Self {
        Self::Assistant(value)
    }
}
