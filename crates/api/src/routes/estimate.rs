//! Estimate Routes

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use scenario_explorer::Scenario;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::controls::EstimateRequest;
use crate::{ApiError, AppState};

/// Response body format
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Deserialize)]
pub struct EstimateQuery {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Price a selection and its scenarios
pub async fn post_estimate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EstimateQuery>,
    Json(request): Json<EstimateRequest>,
) -> Result<Response, ApiError> {
    let start = std::time::Instant::now();
    let resolved = request.resolve(state.context.artifacts().options())?;
    let report = state
        .context
        .estimate(resolved.selection, resolved.occupancy_pct)?;

    metrics::counter!("estimates_total").increment(1);
    metrics::counter!("scenarios_skipped_total")
        .increment((Scenario::ALL.len() - report.scenarios.len()) as u64);
    metrics::histogram!("estimate_duration_seconds").record(start.elapsed().as_secs_f64());
    info!(
        "Estimate: price={:.2}, scenarios={}, took={}us",
        report.baseline_price,
        report.scenarios.len(),
        start.elapsed().as_micros()
    );

    Ok(match params.format {
        OutputFormat::Json => Json(report).into_response(),
        OutputFormat::Text => report.render_text().into_response(),
    })
}
