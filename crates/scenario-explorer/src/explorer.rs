//! Scenario Exploration

use artifact_store::FeatureSchema;
use feature_engine::{FeatureVector, UserSelection};
use inference_engine::InferenceEngine;
use serde::Serialize;
use tracing::debug;

use crate::{Scenario, ScenarioError};

/// Price effect of one applicable scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    /// Predicted price of the modified vector
    pub price: f64,
    /// `price - baseline_price`
    pub delta: f64,
}

/// Prices every applicable scenario against a baseline
pub struct ScenarioExplorer<'a> {
    schema: &'a FeatureSchema,
    engine: &'a InferenceEngine,
}

impl<'a> ScenarioExplorer<'a> {
    pub fn new(schema: &'a FeatureSchema, engine: &'a InferenceEngine) -> Self {
        Self { schema, engine }
    }

    /// Run each scenario on its own copy of `baseline`.
    ///
    /// Scenarios that do not apply are left out; the rest keep
    /// [`Scenario::ALL`] order.
    pub fn explore(
        &self,
        selection: &UserSelection,
        baseline: &FeatureVector,
        baseline_price: f64,
    ) -> Result<Vec<ScenarioOutcome>, ScenarioError> {
        let mut outcomes = Vec::with_capacity(Scenario::ALL.len());

        for scenario in Scenario::ALL {
            let Some(modified) = scenario.apply(self.schema, selection, baseline) else {
                debug!("Scenario '{}' does not apply, skipping", scenario.label());
                continue;
            };

            // Unchanged vectors reprice to the baseline exactly.
            let price = if &modified == baseline {
                baseline_price
            } else {
                self.engine
                    .predict(&modified)
                    .map_err(|source| ScenarioError::Inference {
                        scenario: scenario.label(),
                        source,
                    })?
            };

            let delta = price - baseline_price;
            debug!("Scenario '{}': price={:.2}, delta={:+.2}", scenario.label(), price, delta);
            outcomes.push(ScenarioOutcome {
                scenario,
                price,
                delta,
            });
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WATERFRONT_NEIGHBOURHOOD;
    use feature_engine::FeatureEncoder;
    use inference_engine::{InferenceError, Regressor};

    /// Weighted sum with a 100.0 intercept
    struct Linear(Vec<f64>);

    impl Regressor for Linear {
        fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
            Ok(100.0 + features.values.iter().zip(&self.0).map(|(x, w)| x * w).sum::<f64>())
        }

        fn num_features(&self) -> Option<usize> {
            Some(self.0.len())
        }

        fn name(&self) -> &'static str {
            "linear"
        }
    }

    fn schema() -> FeatureSchema {
        FeatureSchema::new(
            [
                "minimum_nights",
                "neighbourhood_cleansed_Annex",
                "neighbourhood_cleansed_Waterfront Communities-The Island",
                "accommodates_2",
                "accommodates_3",
                "room_type_Private room",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        )
        .unwrap()
    }

    fn engine() -> InferenceEngine {
        let weights = vec![-0.5, 5.0, 25.0, 0.0, 12.0, -30.0];
        InferenceEngine::with_regressor(Box::new(Linear(weights)), 6).unwrap()
    }

    fn run(selection: &UserSelection) -> Vec<ScenarioOutcome> {
        let schema = schema();
        let engine = engine();
        let baseline = FeatureEncoder::new(&schema).encode(selection);
        let baseline_price = engine.predict(&baseline).unwrap();
        ScenarioExplorer::new(&schema, &engine)
            .explore(selection, &baseline, baseline_price)
            .unwrap()
    }

    #[test]
    fn test_all_scenarios_apply() {
        let outcomes = run(&UserSelection {
            neighbourhood: Some("Annex".into()),
            accommodates: Some(2),
            room_type: Some("Private room".into()),
            ..Default::default()
        });

        let deltas: Vec<(Scenario, f64)> = outcomes.iter().map(|o| (o.scenario, o.delta)).collect();
        assert_eq!(
            deltas,
            vec![
                (Scenario::SwitchToEntirePlace, 30.0),
                (Scenario::AddGuest, 12.0),
                (Scenario::MoveToWaterfront, 25.0),
                (Scenario::FewerMinimumNights, 0.5),
            ]
        );
    }

    #[test]
    fn test_waterfront_selection_skips_relocation() {
        let outcomes = run(&UserSelection {
            neighbourhood: Some(WATERFRONT_NEIGHBOURHOOD.into()),
            accommodates: Some(3),
            room_type: Some("Private room".into()),
            minimum_nights: 1,
            ..Default::default()
        });

        let scenarios: Vec<Scenario> = outcomes.iter().map(|o| o.scenario).collect();
        assert_eq!(
            scenarios,
            vec![Scenario::SwitchToEntirePlace, Scenario::FewerMinimumNights]
        );
        assert_eq!(outcomes[1].delta, 0.0);
    }

    #[test]
    fn test_inference_failure_names_scenario() {
        struct Failing;
        impl Regressor for Failing {
            fn predict(&self, _: &FeatureVector) -> Result<f64, InferenceError> {
                Err(InferenceError::InferenceFailed("boom".into()))
            }
            fn num_features(&self) -> Option<usize> {
                None
            }
            fn name(&self) -> &'static str {
                "failing"
            }
        }

        let schema = schema();
        let engine = InferenceEngine::with_regressor(Box::new(Failing), 6).unwrap();
        let selection = UserSelection {
            room_type: Some("Private room".into()),
            ..Default::default()
        };
        let baseline = FeatureEncoder::new(&schema).encode(&selection);
        let err = ScenarioExplorer::new(&schema, &engine)
            .explore(&selection, &baseline, 100.0)
            .unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::Inference {
                scenario: "Switch to Entire Place",
                ..
            }
        ));
    }
}
