//! Scale, classify and format: the per-request forward pass.

use serde::{Deserialize, Serialize};

use crate::artifacts::ArtifactStore;
use crate::classifier::Classifier;
use crate::error::{PredictResult, PredictionError};
use crate::features::{assemble, FeatureVector, PatientObservation};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLabel {
    Yes,
    No,
}

impl RiskLabel {
    pub fn from_class(class: usize) -> Self {
        if class == 1 {
            RiskLabel::Yes
        } else {
            RiskLabel::No
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Yes => "Yes",
            RiskLabel::No => "No",
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub label: RiskLabel,
    /// Probability of the predicted class, in `[0, 1]`.
    pub probability: f64,
}

impl PredictionResult {
    /// Probability of the predicted class as a percentage.
    pub fn confidence(&self) -> f64 {
        self.probability * 100.0
    }

    /// Confidence rendered with one decimal, e.g. `"81.8"`.
    pub fn confidence_text(&self) -> String {
        format!("{:.1}", self.confidence())
    }

    pub fn message(&self) -> String {
        format!("Diabetes Risk: {}", self.label)
    }
}

/// Run the scaler and classifier over an assembled vector.
pub fn infer(store: &ArtifactStore, features: &FeatureVector) -> PredictResult<PredictionResult> {
    let scaled = store.scaler().transform(features.as_slice())?;
    let classifier = store.classifier();

    let class = classifier.predict(&scaled)?;
    let proba = classifier.predict_proba(&scaled)?;
    let probability = *proba.get(class).ok_or_else(|| {
        PredictionError::inference(format!("predicted class {class} has no probability"))
    })?;

    log::trace!("scaled={scaled:?} proba={proba:?} class={class}");
    Ok(PredictionResult {
        label: RiskLabel::from_class(class),
        probability,
    })
}

/// Full pipeline for one observation: assemble, scale, classify.
pub fn predict(store: &ArtifactStore, obs: &PatientObservation) -> PredictResult<PredictionResult> {
    let features = assemble(obs, store.gender_encoder(), store.default_means())?;
    infer(store, &features)
}
