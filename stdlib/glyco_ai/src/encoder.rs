//! Categorical encoding for the gender field.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::artifacts::read_json;
use crate::error::{ArtifactKind, LoadError, PredictResult, PredictionError};

/// Closed set of gender classes fixed at training time.
///
/// The numeric code of a class is its position in `classes`, the same
/// convention the training-side label encoder uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenderEncoder {
    classes: Vec<String>,
}

impl GenderEncoder {
    /// Build an encoder from an explicit class list.
    pub fn new(classes: Vec<String>) -> Result<Self, String> {
        if classes.is_empty() {
            return Err("encoder has no classes".to_string());
        }
        Ok(Self { classes })
    }

    /// Read `{ "classes": [...] }` from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw: GenderEncoder = read_json(ArtifactKind::GenderEncoder, path)?;
        GenderEncoder::new(raw.classes)
            .map_err(|msg| LoadError::corrupt(ArtifactKind::GenderEncoder, path, msg))
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Map a caller-supplied value to its trained code.
    ///
    /// An exact match wins; otherwise the first class equal to the value after
    /// trimming and case folding is used.
    pub fn encode(&self, value: &str) -> PredictResult<f64> {
        if let Some(idx) = self.classes.iter().position(|c| c == value) {
            return Ok(idx as f64);
        }
        let wanted = normalize(value);
        self.classes
            .iter()
            .position(|c| normalize(c) == wanted)
            .map(|idx| idx as f64)
            .ok_or_else(|| PredictionError::UnknownCategory(value.to_string()))
    }

    /// Options shown on the HTML form: trimmed, uppercased, de-duplicated.
    pub fn display_options(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.classes.len());
        for class in &self.classes {
            let label = normalize(class);
            if !out.contains(&label) {
                out.push(label);
            }
        }
        out
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}
