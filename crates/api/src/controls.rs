//! Input Controls
//!
//! Bounds, steps and defaults of every user-facing control, and resolution of
//! an incoming request into a validated [`UserSelection`].

use artifact_store::{CategoricalField, CategoricalOptions};
use feature_engine::UserSelection;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid control values
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field} value {value} is not a multiple of {step}")]
    OffStep {
        field: &'static str,
        value: f64,
        step: f64,
    },
    #[error("{field} has no option {value:?}")]
    UnknownOption { field: &'static str, value: String },
}

/// Slider-like control
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Control<T> {
    pub min: T,
    pub max: T,
    pub step: T,
    pub default: T,
}

impl<T: Copy + Into<f64>> Control<T> {
    fn check(&self, field: &'static str, value: T) -> Result<T, ValidationError> {
        let (v, min, max, step) = (
            value.into(),
            self.min.into(),
            self.max.into(),
            self.step.into(),
        );
        if v < min || v > max || v.is_nan() {
            return Err(ValidationError::OutOfRange {
                field,
                value: v,
                min,
                max,
            });
        }
        let steps = (v - min) / step;
        if (steps - steps.round()).abs() > 1e-9 {
            return Err(ValidationError::OffStep {
                field,
                value: v,
                step,
            });
        }
        Ok(value)
    }
}

/// All numeric controls
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Controls {
    pub bathrooms: Control<f64>,
    pub host_is_superhost: bool,
    pub minimum_nights: Control<u32>,
    pub number_of_reviews: Control<u32>,
    pub review_scores_rating: Control<u32>,
    pub occupancy_pct: Control<u32>,
}

pub const CONTROLS: Controls = Controls {
    bathrooms: Control {
        min: 1.0,
        max: 4.0,
        step: 0.5,
        default: 1.0,
    },
    host_is_superhost: false,
    minimum_nights: Control {
        min: 1,
        max: 90,
        step: 1,
        default: 14,
    },
    number_of_reviews: Control {
        min: 0,
        max: 500,
        step: 1,
        default: 50,
    },
    review_scores_rating: Control {
        min: 60,
        max: 100,
        step: 1,
        default: 90,
    },
    occupancy_pct: Control {
        min: 30,
        max: 100,
        step: 1,
        default: 70,
    },
};

/// Estimate request; any omitted control takes its default
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstimateRequest {
    pub neighbourhood: Option<String>,
    pub accommodates: Option<u32>,
    pub room_type: Option<String>,
    pub bathrooms: Option<f64>,
    pub host_is_superhost: Option<bool>,
    pub minimum_nights: Option<u32>,
    pub number_of_reviews: Option<u32>,
    pub review_scores_rating: Option<u32>,
    pub occupancy_pct: Option<u32>,
}

/// Validated request
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub selection: UserSelection,
    pub occupancy_pct: u32,
}

impl EstimateRequest {
    /// Apply defaults and reject anything the controls would not allow
    pub fn resolve(self, options: &CategoricalOptions) -> Result<ResolvedRequest, ValidationError> {
        let neighbourhood = choose(
            options,
            CategoricalField::Neighbourhood,
            self.neighbourhood,
            options.default_neighbourhood().map(str::to_string),
        )?;
        let accommodates = choose(
            options,
            CategoricalField::Accommodates,
            self.accommodates.map(|a| a.to_string()),
            options.default_accommodates().map(|a| a.to_string()),
        )?
        .and_then(|a| a.parse::<u32>().ok());
        let room_type = choose(
            options,
            CategoricalField::RoomType,
            self.room_type,
            options.default_room_type().map(str::to_string),
        )?;

        let c = &CONTROLS;
        let selection = UserSelection {
            neighbourhood,
            accommodates,
            room_type,
            bathrooms: c
                .bathrooms
                .check("bathrooms", self.bathrooms.unwrap_or(c.bathrooms.default))?,
            host_is_superhost: self.host_is_superhost.unwrap_or(c.host_is_superhost),
            minimum_nights: c.minimum_nights.check(
                "minimum_nights",
                self.minimum_nights.unwrap_or(c.minimum_nights.default),
            )?,
            number_of_reviews: c.number_of_reviews.check(
                "number_of_reviews",
                self.number_of_reviews.unwrap_or(c.number_of_reviews.default),
            )?,
            review_scores_rating: c.review_scores_rating.check(
                "review_scores_rating",
                self.review_scores_rating
                    .unwrap_or(c.review_scores_rating.default),
            )?,
        };
        let occupancy_pct = c.occupancy_pct.check(
            "occupancy_pct",
            self.occupancy_pct.unwrap_or(c.occupancy_pct.default),
        )?;

        Ok(ResolvedRequest {
            selection,
            occupancy_pct,
        })
    }
}

fn field_name(field: CategoricalField) -> &'static str {
    match field {
        CategoricalField::Neighbourhood => "neighbourhood",
        CategoricalField::Accommodates => "accommodates",
        CategoricalField::RoomType => "room_type",
    }
}

fn choose(
    options: &CategoricalOptions,
    field: CategoricalField,
    requested: Option<String>,
    default: Option<String>,
) -> Result<Option<String>, ValidationError> {
    match requested {
        Some(value) if options.contains(field, &value) => Ok(Some(value)),
        Some(value) => Err(ValidationError::UnknownOption {
            field: field_name(field),
            value,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> CategoricalOptions {
        CategoricalOptions {
            neighbourhoods: vec!["Annex".into(), "Niagara".into()],
            accommodates: vec![1, 2, 3],
            room_types: vec!["Entire home/apt".into(), "Private room".into()],
        }
    }

    #[test]
    fn test_empty_request_takes_defaults() {
        let resolved = EstimateRequest::default().resolve(&options()).unwrap();
        assert_eq!(
            resolved.selection,
            UserSelection {
                neighbourhood: Some("Annex".into()),
                accommodates: Some(1),
                room_type: Some("Private room".into()),
                bathrooms: 1.0,
                host_is_superhost: false,
                minimum_nights: 14,
                number_of_reviews: 50,
                review_scores_rating: 90,
            }
        );
        assert_eq!(resolved.occupancy_pct, 70);
    }

    #[test]
    fn test_bathrooms_must_be_on_half_steps() {
        let ok = EstimateRequest {
            bathrooms: Some(2.5),
            ..Default::default()
        };
        assert_eq!(ok.resolve(&options()).unwrap().selection.bathrooms, 2.5);

        let off = EstimateRequest {
            bathrooms: Some(2.25),
            ..Default::default()
        };
        assert!(matches!(
            off.resolve(&options()),
            Err(ValidationError::OffStep {
                field: "bathrooms",
                ..
            })
        ));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let cases = [
            EstimateRequest {
                bathrooms: Some(4.5),
                ..Default::default()
            },
            EstimateRequest {
                minimum_nights: Some(0),
                ..Default::default()
            },
            EstimateRequest {
                number_of_reviews: Some(501),
                ..Default::default()
            },
            EstimateRequest {
                review_scores_rating: Some(59),
                ..Default::default()
            },
            EstimateRequest {
                occupancy_pct: Some(29),
                ..Default::default()
            },
        ];
        for request in cases {
            assert!(matches!(
                request.resolve(&options()),
                Err(ValidationError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let request = EstimateRequest {
            bathrooms: Some(4.0),
            minimum_nights: Some(90),
            number_of_reviews: Some(0),
            review_scores_rating: Some(100),
            occupancy_pct: Some(30),
            ..Default::default()
        };
        assert!(request.resolve(&options()).is_ok());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let request = EstimateRequest {
            accommodates: Some(7),
            ..Default::default()
        };
        assert!(matches!(
            request.resolve(&options()),
            Err(ValidationError::UnknownOption {
                field: "accommodates",
                ..
            })
        ));
    }
}
