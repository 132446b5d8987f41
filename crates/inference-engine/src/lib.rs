//! Price Inference Engine
//!
//! Runs the trained regressor on one feature vector at a time. Models are
//! either XGBoost `save_model` JSON dumps, evaluated natively, or ONNX exports
//! run through tract-onnx.

mod engine;
mod onnx;
mod xgboost;

pub use engine::{InferenceEngine, ModelFormat};
pub use onnx::OnnxRegressor;
pub use xgboost::TreeEnsemble;

use feature_engine::FeatureVector;
use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
}

/// A trained model producing one price per feature vector
pub trait Regressor: Send + Sync {
    /// Predict a single row
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError>;

    /// Input width the model declares, if it declares one
    fn num_features(&self) -> Option<usize>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}
