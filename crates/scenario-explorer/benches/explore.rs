use artifact_store::FeatureSchema;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feature_engine::{FeatureEncoder, UserSelection};
use inference_engine::{InferenceEngine, TreeEnsemble};
use scenario_explorer::ScenarioExplorer;

const MODEL: &str = r#"{
  "learner": {
    "learner_model_param": { "base_score": "1E2", "num_feature": "4" },
    "gradient_booster": {
      "name": "gbtree",
      "model": {
        "trees": [
          {
            "left_children": [1, -1, -1],
            "right_children": [2, -1, -1],
            "split_indices": [3, 0, 0],
            "split_conditions": [0.5, 40.0, -30.0],
            "default_left": [0, 0, 0]
          },
          {
            "left_children": [1, -1, -1],
            "right_children": [2, -1, -1],
            "split_indices": [0, 0, 0],
            "split_conditions": [7.5, 5.0, -5.0],
            "default_left": [0, 0, 0]
          }
        ]
      }
    },
    "objective": { "name": "reg:squarederror" }
  }
}"#;

fn bench_estimate(c: &mut Criterion) {
    let schema = FeatureSchema::new(
        [
            "minimum_nights",
            "accommodates_2",
            "accommodates_3",
            "room_type_Private room",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    )
    .unwrap();
    let model = TreeEnsemble::from_json_str(MODEL).unwrap();
    let engine = InferenceEngine::with_regressor(Box::new(model), schema.len()).unwrap();
    let selection = UserSelection {
        accommodates: Some(2),
        room_type: Some("Private room".into()),
        ..Default::default()
    };

    c.bench_function("encode_predict_explore", |b| {
        b.iter(|| {
            let baseline = FeatureEncoder::new(&schema).encode(black_box(&selection));
            let price = engine.predict(&baseline).unwrap();
            ScenarioExplorer::new(&schema, &engine)
                .explore(&selection, &baseline, price)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
