//! ONNX Regressor (tract)

use crate::{InferenceError, Regressor};
use feature_engine::FeatureVector;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::info;

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX export of the price model, run with a `[1, n]` f32 input
pub struct OnnxRegressor {
    plan: OnnxPlan,
    num_features: usize,
}

impl OnnxRegressor {
    /// Load and optimize the model for a fixed input width
    pub fn load(path: &Path, num_features: usize) -> Result<Self, InferenceError> {
        info!(
            "Loading ONNX model from {} with {} inputs",
            path.display(),
            num_features
        );

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, num_features]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;

        Ok(Self { plan, num_features })
    }
}

impl Regressor for OnnxRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let input: Tensor =
            tract_ndarray::Array2::from_shape_vec((1, self.num_features), features.to_f32())
                .map_err(|_| InferenceError::InvalidInputShape {
                    expected: self.num_features,
                    actual: features.len(),
                })?
                .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::InferenceFailed("model produced no outputs".into()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        view.iter()
            .next()
            .map(|&price| f64::from(price))
            .ok_or_else(|| InferenceError::InferenceFailed("model produced an empty output".into()))
    }

    fn num_features(&self) -> Option<usize> {
        Some(self.num_features)
    }

    fn name(&self) -> &'static str {
        "onnx"
    }
}
