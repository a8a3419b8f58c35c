//! Binary classifiers loaded from exported model files.
//!
//! Two export shapes are understood:
//!
//! - XGBoost JSON model dumps (`learner.gradient_booster.model.trees`), see
//!   [`TreeEnsemble`]
//! - logistic regression coefficients (`coefficients` + `intercept`), see
//!   [`LogisticModel`]
//!
//! Both produce a positive-class probability; class 1 ("Yes") is predicted
//! when that probability exceeds one half.

mod logistic;
mod tree;

pub use logistic::LogisticModel;
pub use tree::{RegressionTree, TreeEnsemble};

use serde_json::Value as JsonValue;
use std::path::Path;

use crate::artifacts::read_json;
use crate::error::{ArtifactKind, LoadError, PredictResult, PredictionError};

/// Trained binary classifier over a scaled feature row.
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// Probability of the positive class for one scaled row.
    fn positive_probability(&self, row: &[f64]) -> PredictResult<f64>;

    /// Short identifier of the model family, used in logs.
    fn backend_type(&self) -> &str;

    /// Number of features the model was trained on, when the export records it.
    fn n_features(&self) -> Option<usize> {
        None
    }

    /// `[P(class 0), P(class 1)]`.
    fn predict_proba(&self, row: &[f64]) -> PredictResult<[f64; 2]> {
        let p = self.positive_probability(row)?;
        if !p.is_finite() {
            return Err(PredictionError::inference(format!(
                "{} produced a non-finite probability",
                self.backend_type()
            )));
        }
        let p = p.clamp(0.0, 1.0);
        Ok([1.0 - p, p])
    }

    /// Predicted class index: 1 when the positive probability exceeds 0.5.
    fn predict(&self, row: &[f64]) -> PredictResult<usize> {
        let proba = self.predict_proba(row)?;
        Ok(usize::from(proba[1] > 0.5))
    }
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Load a classifier, picking the implementation from the document shape.
pub fn load_classifier(path: impl AsRef<Path>) -> Result<Box<dyn Classifier>, LoadError> {
    let path = path.as_ref();
    let doc: JsonValue = read_json(ArtifactKind::Classifier, path)?;
    let corrupt = |msg: String| LoadError::corrupt(ArtifactKind::Classifier, path, msg);

    let model: Box<dyn Classifier> = if doc.get("learner").is_some() {
        Box::new(TreeEnsemble::from_xgboost_json(&doc).map_err(corrupt)?)
    } else if doc.get("coefficients").is_some() {
        let model: LogisticModel = serde_json::from_value(doc).map_err(|e| corrupt(e.to_string()))?;
        Box::new(model.validated().map_err(corrupt)?)
    } else {
        return Err(corrupt(
            "unrecognised model format: expected an XGBoost `learner` or logistic `coefficients`"
                .to_string(),
        ));
    };

    log::debug!("loaded {} classifier from {path:?}", model.backend_type());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(f64);

    impl Classifier for Fixed {
        fn positive_probability(&self, _row: &[f64]) -> PredictResult<f64> {
            Ok(self.0)
        }

        fn backend_type(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn proba_pairs_sum_to_one() {
        let proba = Fixed(0.25).predict_proba(&[]).unwrap();
        assert_eq!(proba, [0.75, 0.25]);
    }

    #[test]
    fn half_is_not_positive() {
        assert_eq!(Fixed(0.5).predict(&[]).unwrap(), 0);
        assert_eq!(Fixed(0.500001).predict(&[]).unwrap(), 1);
    }

    #[test]
    fn nan_probability_is_rejected() {
        let err = Fixed(f64::NAN).predict_proba(&[]).unwrap_err();
        assert!(matches!(err, PredictionError::Inference(_)));
    }

    #[test]
    fn unknown_document_shape_fails_to_load() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let path = tmp.path().join("diabetes_model.json");
        std::fs::write(&path, r#"{"weights":[0.1]}"#).expect("write");
        let err = load_classifier(&path).unwrap_err();
        assert_eq!(err.kind(), ArtifactKind::Classifier);
    }

    #[test]
    fn logistic_document_loads() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        let path = tmp.path().join("diabetes_model.json");
        std::fs::write(&path, r#"{"coefficients":[1.0,-1.0],"intercept":0.0}"#).expect("write");
        let model = load_classifier(&path).expect("load");
        assert_eq!(model.backend_type(), "logistic");
        assert_eq!(model.n_features(), Some(2));
    }
}
