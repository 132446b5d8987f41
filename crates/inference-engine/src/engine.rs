//! Inference Engine Implementation

use crate::{InferenceError, OnnxRegressor, Regressor, TreeEnsemble};
use feature_engine::FeatureVector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// On-disk model format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFormat {
    /// XGBoost `save_model` JSON
    XgboostJson,
    /// ONNX export of the regressor
    Onnx,
}

impl ModelFormat {
    /// Guess the format from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(ModelFormat::XgboostJson),
            "onnx" => Some(ModelFormat::Onnx),
            _ => None,
        }
    }
}

/// Predictor over a loaded regressor
pub struct InferenceEngine {
    model: Box<dyn Regressor>,
    /// Width every input vector must have
    num_features: usize,
}

impl InferenceEngine {
    /// Load a model expecting `num_features` inputs.
    ///
    /// `format` overrides detection from the file extension.
    pub fn load(
        path: &Path,
        format: Option<ModelFormat>,
        num_features: usize,
    ) -> Result<Self, InferenceError> {
        let format = format
            .or_else(|| ModelFormat::from_path(path))
            .ok_or_else(|| {
                InferenceError::UnsupportedModel(format!(
                    "cannot infer model format of {}",
                    path.display()
                ))
            })?;
        info!("Loading {:?} model from {}", format, path.display());

        let model: Box<dyn Regressor> = match format {
            ModelFormat::XgboostJson => Box::new(TreeEnsemble::from_path(path)?),
            ModelFormat::Onnx => Box::new(OnnxRegressor::load(path, num_features)?),
        };

        let engine = Self::with_regressor(model, num_features)?;
        info!(
            "Model loaded: backend={}, features={}",
            engine.model.name(),
            engine.num_features
        );
        Ok(engine)
    }

    /// Wrap an already-built regressor
    pub fn with_regressor(
        model: Box<dyn Regressor>,
        num_features: usize,
    ) -> Result<Self, InferenceError> {
        if let Some(declared) = model.num_features() {
            if declared != num_features {
                return Err(InferenceError::InvalidInputShape {
                    expected: declared,
                    actual: num_features,
                });
            }
        }
        Ok(Self {
            model,
            num_features,
        })
    }

    /// Predict the nightly price for one feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        if features.len() != self.num_features {
            return Err(InferenceError::InvalidInputShape {
                expected: self.num_features,
                actual: features.len(),
            });
        }

        let start = std::time::Instant::now();
        let price = self.model.predict(features)?;
        debug!(
            "Inference completed in {}us: price={:.2}",
            start.elapsed().as_micros(),
            price
        );
        Ok(price)
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn backend(&self) -> &'static str {
        self.model.name()
    }
}
