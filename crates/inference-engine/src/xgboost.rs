//! XGBoost JSON Tree Ensemble
//!
//! Native evaluation of models written by XGBoost's `save_model("*.json")`.
//! Only the `gbtree` booster is supported. A row goes left at a split when
//! `x < split_condition`, and follows `default_left` when `x` is missing (NaN).
//! Leaf weights live in `split_conditions` at leaf positions.

use crate::{InferenceError, Regressor};
use feature_engine::FeatureVector;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ModelFile {
    learner: Learner,
}

#[derive(Debug, Deserialize)]
struct Learner {
    learner_model_param: LearnerModelParam,
    gradient_booster: GradientBooster,
    objective: Objective,
}

#[derive(Debug, Deserialize)]
struct LearnerModelParam {
    base_score: String,
    #[serde(default)]
    num_feature: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GradientBooster {
    name: String,
    #[serde(default)]
    model: Option<GbTreeModel>,
}

#[derive(Debug, Deserialize)]
struct GbTreeModel {
    trees: Vec<TreeFile>,
}

#[derive(Debug, Deserialize)]
struct Objective {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TreeFile {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<u32>,
    split_conditions: Vec<f32>,
    default_left: Vec<Flag>,
    /// 0 numerical, 1 categorical
    #[serde(default)]
    split_type: Vec<u8>,
}

/// Older dumps write 0/1, newer ones booleans
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn as_bool(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

/// Maps the summed margin to a price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Identity,
    Log,
}

impl Link {
    fn for_objective(name: &str) -> Result<Self, InferenceError> {
        match name {
            "reg:squarederror" | "reg:linear" | "reg:absoluteerror" | "reg:pseudohubererror"
            | "reg:quantileerror" => Ok(Link::Identity),
            "reg:gamma" | "reg:tweedie" | "count:poisson" => Ok(Link::Log),
            other => Err(InferenceError::UnsupportedModel(format!(
                "objective {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    left: i32,
    right: i32,
    feature: usize,
    /// Split threshold, or the leaf weight when `left == -1`
    value: f32,
    default_left: bool,
}

impl Node {
    fn is_leaf(&self) -> bool {
        self.left == -1
    }
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_file(idx: usize, file: TreeFile) -> Result<Self, InferenceError> {
        let n = file.left_children.len();
        if [
            file.right_children.len(),
            file.split_indices.len(),
            file.split_conditions.len(),
            file.default_left.len(),
        ]
        .iter()
        .any(|&len| len != n)
            || n == 0
        {
            return Err(InferenceError::ModelLoadError(format!(
                "tree {idx}: node arrays have inconsistent lengths"
            )));
        }

        if let Some(node) = file.split_type.iter().position(|&t| t != 0) {
            return Err(InferenceError::UnsupportedModel(format!(
                "tree {idx}: categorical split at node {node}"
            )));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (left, right) = (file.left_children[i], file.right_children[i]);
            if left != -1 {
                // Children always follow their parent, so traversal terminates.
                let in_range = |c: i32| c > i as i32 && (c as usize) < n;
                if !in_range(left) || !in_range(right) {
                    return Err(InferenceError::ModelLoadError(format!(
                        "tree {idx}: node {i} has invalid children ({left}, {right})"
                    )));
                }
            }
            nodes.push(Node {
                left,
                right,
                feature: file.split_indices[i] as usize,
                value: file.split_conditions[i],
                default_left: file.default_left[i].as_bool(),
            });
        }
        Ok(Self { nodes })
    }

    fn leaf_value(&self, features: &[f64]) -> f32 {
        let mut idx = 0;
        loop {
            let node = &self.nodes[idx];
            if node.is_leaf() {
                return node.value;
            }
            let x = features.get(node.feature).copied().unwrap_or(f64::NAN);
            let go_left = if x.is_nan() {
                node.default_left
            } else {
                (x as f32) < node.value
            };
            let next = if go_left { node.left } else { node.right };
            idx = next as usize;
        }
    }

    fn max_feature(&self) -> Option<usize> {
        self.nodes
            .iter()
            .filter(|n| !n.is_leaf())
            .map(|n| n.feature)
            .max()
    }
}

/// Gradient-boosted regression trees
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    trees: Vec<Tree>,
    base_margin: f64,
    link: Link,
    num_features: Option<usize>,
}

impl TreeEnsemble {
    pub fn from_path(path: &Path) -> Result<Self, InferenceError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, InferenceError> {
        let file: ModelFile = serde_json::from_str(raw)
            .map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;
        let learner = file.learner;

        if learner.gradient_booster.name != "gbtree" {
            return Err(InferenceError::UnsupportedModel(format!(
                "booster {}",
                learner.gradient_booster.name
            )));
        }
        let model = learner.gradient_booster.model.ok_or_else(|| {
            InferenceError::ModelLoadError("gbtree booster has no model".to_string())
        })?;

        let link = Link::for_objective(&learner.objective.name)?;
        let base_score = parse_float_param(&learner.learner_model_param.base_score)?;
        let base_margin = match link {
            Link::Identity => base_score,
            Link::Log if base_score > 0.0 => base_score.ln(),
            Link::Log => {
                return Err(InferenceError::ModelLoadError(format!(
                    "base_score {base_score} must be positive for a log link"
                )))
            }
        };

        let num_features = match learner.learner_model_param.num_feature.as_deref() {
            Some(raw) => Some(raw.trim().parse::<usize>().map_err(|e| {
                InferenceError::ModelLoadError(format!("num_feature {raw:?}: {e}"))
            })?),
            None => None,
        }
        .filter(|&n| n > 0);

        let trees = model
            .trees
            .into_iter()
            .enumerate()
            .map(|(idx, tree)| Tree::from_file(idx, tree))
            .collect::<Result<Vec<_>, _>>()?;

        if let (Some(declared), Some(used)) =
            (num_features, trees.iter().filter_map(Tree::max_feature).max())
        {
            if used >= declared {
                return Err(InferenceError::ModelLoadError(format!(
                    "split on feature {used} but model declares {declared} features"
                )));
            }
        }

        debug!(
            "Parsed XGBoost model: {} trees, base_score={}, objective={}",
            trees.len(),
            base_score,
            learner.objective.name
        );

        Ok(Self {
            trees,
            base_margin,
            link,
            num_features,
        })
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    fn margin(&self, features: &[f64]) -> f64 {
        self.base_margin
            + self
                .trees
                .iter()
                .map(|t| f64::from(t.leaf_value(features)))
                .sum::<f64>()
    }
}

impl Regressor for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let margin = self.margin(&features.values);
        Ok(match self.link {
            Link::Identity => margin,
            Link::Log => margin.exp(),
        })
    }

    fn num_features(&self) -> Option<usize> {
        self.num_features
    }

    fn name(&self) -> &'static str {
        "xgboost-json"
    }
}

/// XGBoost 2.x wraps scalar params in brackets, e.g. `"[1.5E2]"`
fn parse_float_param(raw: &str) -> Result<f64, InferenceError> {
    let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']');
    trimmed
        .parse::<f64>()
        .map_err(|e| InferenceError::ModelLoadError(format!("base_score {raw:?}: {e}")))
}
