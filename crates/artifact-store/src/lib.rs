//! Artifact Store
//!
//! Loads the precomputed artifacts produced at training time (feature schema,
//! categorical option lists, dataset averages) once, and serves them read-only.

mod options;
mod schema;
mod store;

pub use options::{AverageStatistics, CategoricalOptions, PRIVATE_ROOM};
pub use schema::{CategoricalField, FeatureSchema, NumericField};
pub use store::{ArtifactPaths, ArtifactStore};

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading or validating artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse artifact {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Feature schema is empty")]
    EmptySchema,
    #[error("Duplicate schema column: {0}")]
    DuplicateColumn(String),
    #[error("Option list is empty: {0}")]
    EmptyOptions(&'static str),
    #[error("Missing average statistic: {0}")]
    MissingAverage(&'static str),
}
