//! Nightly Price Estimator API Server
//!
//! HTTP front end over the estimate pipeline: option lists for building a
//! selection form, and estimates rendered as JSON or text.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
pub mod context;
pub mod controls;
mod error;
pub mod report;
mod routes;

pub use crate::config::{EstimatorConfig, LoggingConfig, ServerConfig};
pub use context::EstimatorContext;
pub use error::ApiError;

/// Application state shared across handlers
pub struct AppState {
    /// Loaded artifacts and model
    pub context: EstimatorContext,
    /// Prometheus handle when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(context: EstimatorContext, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            context,
            metrics,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model_backend: String,
    pub schema_columns: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>, server: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/options", get(routes::options::get_options))
        .route("/api/v1/estimate", post(routes::estimate::post_estimate))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http());

    let router = if server.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };
    router.with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model_backend: state.context.engine().backend().to_string(),
        schema_columns: state.context.artifacts().schema().len(),
    })
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled".to_string()),
    }
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> Result<(), ApiError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| ApiError::Logging(format!("unknown log level {:?}", config.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| ApiError::Logging(e.to_string()))
}

/// Install the global Prometheus recorder
pub fn install_metrics() -> Result<PrometheusHandle, ApiError> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ApiError::Metrics(e.to_string()))
}

/// Run the server
pub async fn run_server(server: &ServerConfig, state: Arc<AppState>) -> Result<(), ApiError> {
    let app = create_router(state, server);

    info!("Starting API server on {}", server.bind_addr);

    let listener = tokio::net::TcpListener::bind(&server.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
