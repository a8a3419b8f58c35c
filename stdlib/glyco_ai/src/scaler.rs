//! Standardisation with parameters fixed at training time.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::artifacts::read_json;
use crate::error::{ArtifactKind, LoadError, PredictResult, PredictionError};

/// Per-feature z-score transform: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, String> {
        if mean.len() != scale.len() {
            return Err(format!(
                "mean has {} entries but scale has {}",
                mean.len(),
                scale.len()
            ));
        }
        if let Some(idx) = mean
            .iter()
            .chain(scale.iter())
            .position(|v| !v.is_finite())
        {
            return Err(format!("non-finite parameter at position {idx}"));
        }
        Ok(Self { mean, scale })
    }

    /// Read `{ "mean": [...], "scale": [...] }` from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw: StandardScaler = read_json(ArtifactKind::Scaler, path)?;
        StandardScaler::new(raw.mean, raw.scale)
            .map_err(|msg| LoadError::corrupt(ArtifactKind::Scaler, path, msg))
    }

    /// Number of features the scaler was fitted on.
    pub fn width(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, row: &[f64]) -> PredictResult<Vec<f64>> {
        if row.len() != self.width() {
            return Err(PredictionError::inference(format!(
                "scaler expects {} features, got {}",
                self.width(),
                row.len()
            )));
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (m, s))| {
                // Constant features were fitted with a zero scale.
                let s = if *s == 0.0 { 1.0 } else { *s };
                (x - m) / s
            })
            .collect())
    }
}
