//! Feature Schema

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::ArtifactError;

/// Categorical attribute expanded into one-hot columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Neighbourhood,
    Accommodates,
    RoomType,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 3] = [
        CategoricalField::Neighbourhood,
        CategoricalField::Accommodates,
        CategoricalField::RoomType,
    ];

    /// Column-name prefix used by the training pipeline
    pub fn column_prefix(&self) -> &'static str {
        match self {
            CategoricalField::Neighbourhood => "neighbourhood_cleansed",
            CategoricalField::Accommodates => "accommodates",
            CategoricalField::RoomType => "room_type",
        }
    }

    /// One-hot column name for a value, `<prefix>_<value>`
    pub fn column_name(&self, value: &str) -> String {
        format!("{}_{}", self.column_prefix(), value)
    }
}

/// Numeric attribute copied straight into its column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Bathrooms,
    HostIsSuperhost,
    MinimumNights,
    NumberOfReviews,
    ReviewScoresRating,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::Bathrooms,
        NumericField::HostIsSuperhost,
        NumericField::MinimumNights,
        NumericField::NumberOfReviews,
        NumericField::ReviewScoresRating,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            NumericField::Bathrooms => "bathrooms",
            NumericField::HostIsSuperhost => "host_is_superhost",
            NumericField::MinimumNights => "minimum_nights",
            NumericField::NumberOfReviews => "number_of_reviews",
            NumericField::ReviewScoresRating => "review_scores_rating",
        }
    }
}

/// Ordered column set the model was trained on.
///
/// Lookup tables for numeric fields and (field, value) one-hot pairs are
/// built once here, so callers never assemble column names themselves.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    columns: Vec<String>,
    numeric: HashMap<NumericField, usize>,
    one_hot: HashMap<CategoricalField, HashMap<String, usize>>,
}

impl FeatureSchema {
    /// Build a schema from ordered column names
    pub fn new(columns: Vec<String>) -> Result<Self, ArtifactError> {
        if columns.is_empty() {
            return Err(ArtifactError::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(dup) = columns.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(ArtifactError::DuplicateColumn(dup.clone()));
        }

        let mut numeric = HashMap::new();
        let mut one_hot: HashMap<CategoricalField, HashMap<String, usize>> = HashMap::new();

        for (idx, column) in columns.iter().enumerate() {
            if let Some(field) = NumericField::ALL
                .iter()
                .find(|f| f.column_name() == column.as_str())
            {
                numeric.insert(*field, idx);
                continue;
            }

            for field in CategoricalField::ALL {
                let value = column
                    .strip_prefix(field.column_prefix())
                    .and_then(|rest| rest.strip_prefix('_'));
                if let Some(value) = value {
                    one_hot
                        .entry(field)
                        .or_default()
                        .insert(value.to_string(), idx);
                    break;
                }
            }
        }

        debug!(
            "Feature schema: {} columns, {} numeric, {} one-hot",
            columns.len(),
            numeric.len(),
            one_hot.values().map(HashMap::len).sum::<usize>()
        );

        Ok(Self {
            columns,
            numeric,
            one_hot,
        })
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, idx: usize) -> Option<&str> {
        self.columns.get(idx).map(String::as_str)
    }

    /// Column index of a numeric field, if the model uses it
    pub fn numeric_index(&self, field: NumericField) -> Option<usize> {
        self.numeric.get(&field).copied()
    }

    /// Column index for `field == value`, if the model has that column
    pub fn one_hot_index(&self, field: CategoricalField, value: &str) -> Option<usize> {
        self.one_hot.get(&field)?.get(value).copied()
    }

    /// All one-hot column indices of a field, in schema order
    pub fn one_hot_indices(&self, field: CategoricalField) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .one_hot
            .get(&field)
            .map(|values| values.values().copied().collect())
            .unwrap_or_default();
        indices.sort_unstable();
        indices
    }
}
