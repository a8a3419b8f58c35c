//! Gradient boosted tree ensemble read from an XGBoost JSON model dump.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{sigmoid, Classifier};
use crate::error::{PredictResult, PredictionError};

/// One tree in XGBoost's array layout: node `i` is described by entry `i` of
/// every vector, and a node is a leaf when `left_children[i] == -1`. For a
/// leaf, `split_conditions[i]` holds the leaf value (learning rate applied).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RegressionTree {
    pub left_children: Vec<i64>,
    pub right_children: Vec<i64>,
    pub split_indices: Vec<usize>,
    pub split_conditions: Vec<f64>,
}

impl RegressionTree {
    fn check(&self) -> Result<(), String> {
        let n = self.left_children.len();
        if n == 0 {
            return Err("tree has no nodes".into());
        }
        let lens = [
            self.right_children.len(),
            self.split_indices.len(),
            self.split_conditions.len(),
        ];
        if lens.iter().any(|&len| len != n) {
            return Err(format!("node arrays disagree in length ({n} vs {lens:?})"));
        }
        for (id, (&l, &r)) in self
            .left_children
            .iter()
            .zip(self.right_children.iter())
            .enumerate()
        {
            if l == -1 {
                continue;
            }
            let in_range = |c: i64| c > id as i64 && (c as usize) < n;
            if !in_range(l) || !in_range(r) {
                return Err(format!("node {id} has invalid children ({l}, {r})"));
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf and return its weight.
    pub fn leaf_value(&self, row: &[f64]) -> PredictResult<f64> {
        let mut node = 0usize;
        loop {
            let left = self.left_children[node];
            if left == -1 {
                return Ok(self.split_conditions[node]);
            }
            let feature = self.split_indices[node];
            let value = row.get(feature).ok_or_else(|| {
                PredictionError::inference(format!(
                    "split on feature {feature} but row has {} features",
                    row.len()
                ))
            })?;
            node = if *value < self.split_conditions[node] {
                left as usize
            } else {
                self.right_children[node] as usize
            };
        }
    }

    fn max_split_index(&self) -> Option<usize> {
        self.left_children
            .iter()
            .zip(self.split_indices.iter())
            .filter(|(l, _)| **l != -1)
            .map(|(_, idx)| *idx)
            .max()
    }
}

/// Sum of tree outputs pushed through the logistic link.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsemble {
    pub trees: Vec<RegressionTree>,
    /// Margin added before the sigmoid, `logit(base_score)`.
    pub base_margin: f64,
    pub num_feature: Option<usize>,
}

impl TreeEnsemble {
    pub fn new(trees: Vec<RegressionTree>, base_margin: f64) -> Result<Self, String> {
        if trees.is_empty() {
            return Err("model has no trees".into());
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.check().map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(Self {
            trees,
            base_margin,
            num_feature: None,
        })
    }

    /// Build from the document XGBoost writes with `save_model("*.json")`.
    pub fn from_xgboost_json(doc: &JsonValue) -> Result<Self, String> {
        let learner = doc.get("learner").ok_or("missing `learner`")?;

        if let Some(objective) = learner.pointer("/objective/name").and_then(JsonValue::as_str) {
            if objective != "binary:logistic" {
                return Err(format!("unsupported objective {objective:?}"));
            }
        }

        let trees = learner
            .pointer("/gradient_booster/model/trees")
            .cloned()
            .ok_or("missing `learner.gradient_booster.model.trees`")?;
        let trees: Vec<RegressionTree> =
            serde_json::from_value(trees).map_err(|e| format!("invalid tree layout: {e}"))?;

        let params = learner.get("learner_model_param");
        let base_margin = match params.and_then(|p| p.get("base_score")) {
            Some(raw) => {
                let score = parse_param(raw).ok_or_else(|| format!("invalid base_score {raw}"))?;
                if !(score > 0.0 && score < 1.0) {
                    return Err(format!("base_score {score} outside (0, 1)"));
                }
                (score / (1.0 - score)).ln()
            }
            None => 0.0,
        };

        let mut model = TreeEnsemble::new(trees, base_margin)?;
        model.num_feature = params
            .and_then(|p| p.get("num_feature"))
            .and_then(parse_param)
            .map(|n| n as usize)
            .filter(|n| *n > 0);

        if let (Some(width), Some(max)) = (
            model.num_feature,
            model.trees.iter().filter_map(RegressionTree::max_split_index).max(),
        ) {
            if max >= width {
                return Err(format!("split on feature {max} but model declares {width} features"));
            }
        }
        Ok(model)
    }

    /// Raw additive score before the sigmoid.
    pub fn margin(&self, row: &[f64]) -> PredictResult<f64> {
        let mut margin = self.base_margin;
        for tree in &self.trees {
            margin += tree.leaf_value(row)?;
        }
        Ok(margin)
    }
}

/// XGBoost stores scalar params as strings, sometimes wrapped in brackets
/// (`"5E-1"`, `"[5E-1]"`).
fn parse_param(raw: &JsonValue) -> Option<f64> {
    match raw {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim()
            .parse()
            .ok(),
        _ => None,
    }
}

impl Classifier for TreeEnsemble {
    fn positive_probability(&self, row: &[f64]) -> PredictResult<f64> {
        Ok(sigmoid(self.margin(row)?))
    }

    fn backend_type(&self) -> &str {
        "xgboost"
    }

    fn n_features(&self) -> Option<usize> {
        self.num_feature
    }
}
