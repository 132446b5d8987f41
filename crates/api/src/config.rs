//! Service configuration
//!
//! Layered from serde defaults, an optional TOML file, and `ESTIMATOR__*`
//! environment variables (e.g. `ESTIMATOR__SERVER__BIND_ADDR`).

use artifact_store::ArtifactPaths;
use config::{Config, Environment, File};
use inference_engine::ModelFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ApiError;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "price-estimator";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub server: ServerConfig,
    pub artifacts: ArtifactPaths,
    /// Overrides detection from the model file extension
    pub model_format: Option<ModelFormat>,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Allow any origin, for a browser front end served elsewhere
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Serve Prometheus metrics on `/metrics`
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl EstimatorConfig {
    /// Load configuration. An explicit `path` must exist; otherwise
    /// `price-estimator.toml` is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ApiError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("ESTIMATOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
