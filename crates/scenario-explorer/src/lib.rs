//! Scenario Explorer
//!
//! Re-prices modified copies of the baseline feature vector and reports how
//! far each moves the nightly price.

mod explorer;
mod scenario;

pub use explorer::{ScenarioExplorer, ScenarioOutcome};
pub use scenario::{Scenario, WATERFRONT_NEIGHBOURHOOD};

use inference_engine::InferenceError;
use thiserror::Error;

/// Errors while exploring scenarios
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Scenario {scenario} could not be priced: {source}")]
    Inference {
        scenario: &'static str,
        #[source]
        source: InferenceError,
    },
}
