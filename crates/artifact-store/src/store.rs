//! Artifact Loading

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::{ArtifactError, AverageStatistics, CategoricalOptions, FeatureSchema};

/// Location of the artifact files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    /// Directory holding every artifact
    pub dir: PathBuf,
    /// Trained model (`.json` XGBoost dump or `.onnx`)
    pub model: String,
    pub feature_columns: String,
    pub neighbourhoods: String,
    pub accommodates: String,
    pub room_types: String,
    pub average_values: String,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("artifacts"),
            model: "model.json".to_string(),
            feature_columns: "feature_columns.json".to_string(),
            neighbourhoods: "neighbourhoods.json".to_string(),
            accommodates: "accommodates.json".to_string(),
            room_types: "room_types.json".to_string(),
            average_values: "average_values.json".to_string(),
        }
    }
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join(&self.model)
    }

    fn resolve(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

/// Schema, option lists and averages, loaded once and never mutated
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    schema: FeatureSchema,
    options: CategoricalOptions,
    averages: AverageStatistics,
}

impl ArtifactStore {
    /// Load every non-model artifact from disk
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        info!("Loading artifacts from {}", paths.dir.display());

        let columns: Vec<String> = read_json(&paths.resolve(&paths.feature_columns))?;
        let options = CategoricalOptions {
            neighbourhoods: read_json(&paths.resolve(&paths.neighbourhoods))?,
            accommodates: read_json(&paths.resolve(&paths.accommodates))?,
            room_types: read_json(&paths.resolve(&paths.room_types))?,
        };
        let averages: BTreeMap<String, f64> = read_json(&paths.resolve(&paths.average_values))?;

        let store = Self::from_parts(
            FeatureSchema::new(columns)?,
            options,
            AverageStatistics::new(averages),
        )?;

        info!(
            "Artifacts loaded: {} schema columns, {} neighbourhoods, {} room types, {} averages",
            store.schema.len(),
            store.options.neighbourhoods.len(),
            store.options.room_types.len(),
            store.averages.len()
        );
        Ok(store)
    }

    /// Assemble a store from already-built parts
    pub fn from_parts(
        schema: FeatureSchema,
        options: CategoricalOptions,
        averages: AverageStatistics,
    ) -> Result<Self, ArtifactError> {
        options.validate()?;
        averages.validate()?;
        Ok(Self {
            schema,
            options,
            averages,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn options(&self) -> &CategoricalOptions {
        &self.options
    }

    pub fn averages(&self) -> &AverageStatistics {
        &self.averages
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoricalField, NumericField};

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    fn write_artifacts(dir: &Path) {
        write(
            dir,
            "feature_columns.json",
            r#"["bathrooms", "minimum_nights", "accommodates_2", "room_type_Private room"]"#,
        );
        write(dir, "neighbourhoods.json", r#"["Annex", "Niagara"]"#);
        write(dir, "accommodates.json", "[1, 2, 3]");
        write(dir, "room_types.json", r#"["Entire home/apt", "Private room"]"#);
        write(
            dir,
            "average_values.json",
            r#"{"bathrooms": 1.25, "minimum_nights": 18.4, "number_of_reviews": 41.0}"#,
        );
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());

        let store = ArtifactStore::load(&ArtifactPaths::in_dir(dir.path())).unwrap();
        assert_eq!(store.schema().len(), 4);
        assert_eq!(
            store.schema().one_hot_index(CategoricalField::Accommodates, "2"),
            Some(2)
        );
        assert_eq!(store.options().default_room_type(), Some("Private room"));
        assert_eq!(store.averages().get(NumericField::MinimumNights), Some(18.4));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArtifactStore::load(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_artifacts(dir.path());
        write(dir.path(), "accommodates.json", r#"["two"]"#);

        let err = ArtifactStore::load(&ArtifactPaths::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { path, .. } if path.ends_with("accommodates.json")));
    }
}
