//! API Error Types

use artifact_store::ArtifactError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::InferenceError;
use scenario_explorer::ScenarioError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::controls::ValidationError;

/// Errors surfaced by the estimator service
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),
    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("Model expects {model} features but schema has {schema} columns")]
    SchemaMismatch { model: usize, schema: usize },
    #[error("Logging setup failed: {0}")]
    Logging(String),
    #[error("Metrics setup failed: {0}")]
    Metrics(String),
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
