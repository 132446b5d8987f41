//! User Selection

use artifact_store::{CategoricalField, NumericField};
use serde::{Deserialize, Serialize};

/// Attributes currently chosen for the property.
///
/// A categorical field left as `None` contributes no one-hot column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSelection {
    pub neighbourhood: Option<String>,
    pub accommodates: Option<u32>,
    pub room_type: Option<String>,
    pub bathrooms: f64,
    pub host_is_superhost: bool,
    pub minimum_nights: u32,
    pub number_of_reviews: u32,
    pub review_scores_rating: u32,
}

impl Default for UserSelection {
    fn default() -> Self {
        Self {
            neighbourhood: None,
            accommodates: None,
            room_type: None,
            bathrooms: 1.0,
            host_is_superhost: false,
            minimum_nights: 14,
            number_of_reviews: 50,
            review_scores_rating: 90,
        }
    }
}

impl UserSelection {
    /// Value written into a numeric column
    pub fn numeric_value(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Bathrooms => self.bathrooms,
            NumericField::HostIsSuperhost => {
                if self.host_is_superhost {
                    1.0
                } else {
                    0.0
                }
            }
            NumericField::MinimumNights => f64::from(self.minimum_nights),
            NumericField::NumberOfReviews => f64::from(self.number_of_reviews),
            NumericField::ReviewScoresRating => f64::from(self.review_scores_rating),
        }
    }

    /// Chosen value of a categorical field, as it appears in column names
    pub fn categorical_value(&self, field: CategoricalField) -> Option<String> {
        match field {
            CategoricalField::Neighbourhood => self.neighbourhood.clone(),
            CategoricalField::Accommodates => self.accommodates.map(|a| a.to_string()),
            CategoricalField::RoomType => self.room_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_controls() {
        let selection = UserSelection::default();
        assert_eq!(selection.numeric_value(NumericField::Bathrooms), 1.0);
        assert_eq!(selection.numeric_value(NumericField::HostIsSuperhost), 0.0);
        assert_eq!(selection.numeric_value(NumericField::MinimumNights), 14.0);
        assert_eq!(selection.numeric_value(NumericField::NumberOfReviews), 50.0);
        assert_eq!(selection.numeric_value(NumericField::ReviewScoresRating), 90.0);
    }

    #[test]
    fn test_categorical_values() {
        let selection = UserSelection {
            accommodates: Some(4),
            room_type: Some("Shared room".into()),
            ..Default::default()
        };
        assert_eq!(
            selection.categorical_value(CategoricalField::Accommodates),
            Some("4".to_string())
        );
        assert_eq!(
            selection.categorical_value(CategoricalField::RoomType),
            Some("Shared room".to_string())
        );
        assert_eq!(selection.categorical_value(CategoricalField::Neighbourhood), None);
    }
}
