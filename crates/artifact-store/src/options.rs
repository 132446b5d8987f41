//! Categorical Option Sets and Average Statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{ArtifactError, CategoricalField, NumericField};

/// Room type preselected when the option list carries it
pub const PRIVATE_ROOM: &str = "Private room";

/// Valid choices for each categorical field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalOptions {
    pub neighbourhoods: Vec<String>,
    pub accommodates: Vec<u32>,
    pub room_types: Vec<String>,
}

impl CategoricalOptions {
    /// Reject option lists that leave a control with nothing to select
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.neighbourhoods.is_empty() {
            return Err(ArtifactError::EmptyOptions("neighbourhoods"));
        }
        if self.accommodates.is_empty() {
            return Err(ArtifactError::EmptyOptions("accommodates"));
        }
        if self.room_types.is_empty() {
            return Err(ArtifactError::EmptyOptions("room_types"));
        }
        Ok(())
    }

    pub fn default_neighbourhood(&self) -> Option<&str> {
        self.neighbourhoods.first().map(String::as_str)
    }

    pub fn default_accommodates(&self) -> Option<u32> {
        self.accommodates.first().copied()
    }

    /// "Private room" when offered, otherwise the first room type
    pub fn default_room_type(&self) -> Option<&str> {
        self.room_types
            .iter()
            .find(|r| r.as_str() == PRIVATE_ROOM)
            .or_else(|| self.room_types.first())
            .map(String::as_str)
    }

    /// Whether `value` is one of the offered choices for `field`
    pub fn contains(&self, field: CategoricalField, value: &str) -> bool {
        match field {
            CategoricalField::Neighbourhood => self.neighbourhoods.iter().any(|n| n == value),
            CategoricalField::Accommodates => value
                .parse::<u32>()
                .map(|v| self.accommodates.contains(&v))
                .unwrap_or(false),
            CategoricalField::RoomType => self.room_types.iter().any(|r| r == value),
        }
    }
}

/// Dataset-wide means used for display comparison
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AverageStatistics {
    values: BTreeMap<String, f64>,
}

impl AverageStatistics {
    /// Fields the comparison report always shows
    pub const REQUIRED: [NumericField; 3] = [
        NumericField::Bathrooms,
        NumericField::MinimumNights,
        NumericField::NumberOfReviews,
    ];

    pub fn new(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        for field in Self::REQUIRED {
            if !self.values.contains_key(field.column_name()) {
                return Err(ArtifactError::MissingAverage(field.column_name()));
            }
        }
        Ok(())
    }

    pub fn get(&self, field: NumericField) -> Option<f64> {
        self.values.get(field.column_name()).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(room_types: &[&str]) -> CategoricalOptions {
        CategoricalOptions {
            neighbourhoods: vec!["Annex".into(), "Niagara".into()],
            accommodates: vec![1, 2, 3],
            room_types: room_types.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_room_type_prefers_private_room() {
        let opts = options(&["Entire home/apt", "Private room", "Shared room"]);
        assert_eq!(opts.default_room_type(), Some("Private room"));

        let opts = options(&["Entire home/apt", "Shared room"]);
        assert_eq!(opts.default_room_type(), Some("Entire home/apt"));
    }

    #[test]
    fn test_contains() {
        let opts = options(&["Private room"]);
        assert!(opts.contains(CategoricalField::Neighbourhood, "Niagara"));
        assert!(!opts.contains(CategoricalField::Neighbourhood, "Rouge"));
        assert!(opts.contains(CategoricalField::Accommodates, "3"));
        assert!(!opts.contains(CategoricalField::Accommodates, "three"));
        assert!(!opts.contains(CategoricalField::RoomType, "Hotel room"));
    }

    #[test]
    fn test_empty_options_rejected() {
        let opts = options(&[]);
        assert!(matches!(
            opts.validate(),
            Err(ArtifactError::EmptyOptions("room_types"))
        ));
    }

    #[test]
    fn test_averages_require_report_fields() {
        let mut values = BTreeMap::new();
        values.insert("bathrooms".to_string(), 1.3);
        values.insert("minimum_nights".to_string(), 12.0);
        let averages = AverageStatistics::new(values);
        assert!(matches!(
            averages.validate(),
            Err(ArtifactError::MissingAverage("number_of_reviews"))
        ));
        assert_eq!(averages.get(NumericField::Bathrooms), Some(1.3));
    }
}
