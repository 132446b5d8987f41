//! What-if Scenarios

use artifact_store::{CategoricalField, FeatureSchema, NumericField, PRIVATE_ROOM};
use feature_engine::{FeatureVector, UserSelection};
use serde::{Deserialize, Serialize};

/// Neighbourhood the relocation scenario moves the property to
pub const WATERFRONT_NEIGHBOURHOOD: &str = "Waterfront Communities-The Island";

/// Fixed what-if variations of the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Clear the private-room flag
    SwitchToEntirePlace,
    /// Also flag the next accommodates value
    AddGuest,
    /// Flag the waterfront neighbourhood
    MoveToWaterfront,
    /// One fewer minimum night, never below 1
    FewerMinimumNights,
}

impl Scenario {
    /// Scenarios in report order
    pub const ALL: [Scenario; 4] = [
        Scenario::SwitchToEntirePlace,
        Scenario::AddGuest,
        Scenario::MoveToWaterfront,
        Scenario::FewerMinimumNights,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::SwitchToEntirePlace => "Switch to Entire Place",
            Scenario::AddGuest => "Add 1 More Guest",
            Scenario::MoveToWaterfront => "Move to Waterfront Island",
            Scenario::FewerMinimumNights => "-1 Minimum Night",
        }
    }

    /// Build the modified copy of `baseline`, or `None` when the scenario
    /// does not apply to this schema and selection.
    pub fn apply(
        &self,
        schema: &FeatureSchema,
        selection: &UserSelection,
        baseline: &FeatureVector,
    ) -> Option<FeatureVector> {
        match self {
            Scenario::SwitchToEntirePlace => {
                let idx = schema.one_hot_index(CategoricalField::RoomType, PRIVATE_ROOM)?;
                (baseline.get(idx) == Some(1.0)).then(|| baseline.with(idx, 0.0))
            }
            Scenario::AddGuest => {
                let next = selection.accommodates?.checked_add(1)?;
                let idx = schema.one_hot_index(CategoricalField::Accommodates, &next.to_string())?;
                Some(baseline.with(idx, 1.0))
            }
            Scenario::MoveToWaterfront => {
                let idx = schema
                    .one_hot_index(CategoricalField::Neighbourhood, WATERFRONT_NEIGHBOURHOOD)?;
                (baseline.get(idx) == Some(0.0)).then(|| baseline.with(idx, 1.0))
            }
            Scenario::FewerMinimumNights => {
                let idx = schema.numeric_index(NumericField::MinimumNights)?;
                let nights = selection.minimum_nights.saturating_sub(1).max(1);
                Some(baseline.with(idx, f64::from(nights)))
            }
        }
    }
}
