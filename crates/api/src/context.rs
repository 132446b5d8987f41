//! Estimator Context

use artifact_store::ArtifactStore;
use feature_engine::{FeatureEncoder, UserSelection};
use inference_engine::InferenceEngine;
use scenario_explorer::ScenarioExplorer;
use tracing::{debug, info};

use crate::config::EstimatorConfig;
use crate::report::EstimateReport;
use crate::ApiError;

/// Artifacts and model, built once at startup and read-only afterwards
pub struct EstimatorContext {
    artifacts: ArtifactStore,
    engine: InferenceEngine,
}

impl EstimatorContext {
    /// Load artifacts and the model named by the configuration
    pub fn initialize(config: &EstimatorConfig) -> Result<Self, ApiError> {
        let artifacts = ArtifactStore::load(&config.artifacts)?;
        let engine = InferenceEngine::load(
            &config.artifacts.model_path(),
            config.model_format,
            artifacts.schema().len(),
        )?;
        let context = Self::new(artifacts, engine)?;
        info!(
            "Estimator ready: {} features, backend={}",
            context.artifacts.schema().len(),
            context.engine.backend()
        );
        Ok(context)
    }

    pub fn new(artifacts: ArtifactStore, engine: InferenceEngine) -> Result<Self, ApiError> {
        if engine.num_features() != artifacts.schema().len() {
            return Err(ApiError::SchemaMismatch {
                model: engine.num_features(),
                schema: artifacts.schema().len(),
            });
        }
        Ok(Self { artifacts, engine })
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Baseline price, scenario deltas, comparisons and revenue projection
    pub fn estimate(
        &self,
        selection: UserSelection,
        occupancy_pct: u32,
    ) -> Result<EstimateReport, ApiError> {
        let schema = self.artifacts.schema();
        let baseline = FeatureEncoder::new(schema).encode(&selection);
        let baseline_price = self.engine.predict(&baseline)?;
        debug!("Baseline price {:.2} for {:?}", baseline_price, selection);

        let outcomes =
            ScenarioExplorer::new(schema, &self.engine).explore(&selection, &baseline, baseline_price)?;

        Ok(EstimateReport::new(
            selection,
            baseline_price,
            &outcomes,
            self.artifacts.averages(),
            occupancy_pct,
        ))
    }
}
