use serde::{Deserialize, Serialize};

use super::{sigmoid, Classifier};
use crate::error::{PredictResult, PredictionError};

/// Logistic regression over the scaled row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    pub(crate) fn validated(self) -> Result<Self, String> {
        if self.coefficients.is_empty() {
            return Err("model has no coefficients".into());
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err("model has non-finite parameters".into());
        }
        Ok(self)
    }
}

impl Classifier for LogisticModel {
    fn positive_probability(&self, row: &[f64]) -> PredictResult<f64> {
        if row.len() != self.coefficients.len() {
            return Err(PredictionError::inference(format!(
                "model expects {} features, got {}",
                self.coefficients.len(),
                row.len()
            )));
        }
        let z: f64 = self
            .coefficients
            .iter()
            .zip(row.iter())
            .map(|(w, x)| w * x)
            .sum();
        Ok(sigmoid(z + self.intercept))
    }

    fn backend_type(&self) -> &str {
        "logistic"
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }
}
