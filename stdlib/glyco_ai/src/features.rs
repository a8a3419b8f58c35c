//! Patient input and the fixed-order feature vector the model was trained on.
//!
//! The order in [`FEATURE_NAMES`] is a contract with the trained artifacts:
//! reordering it silently corrupts every prediction.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::encoder::GenderEncoder;
use crate::error::{PredictResult, PredictionError};
use crate::means::DefaultMeans;

/// Number of model inputs.
pub const N_FEATURES: usize = 11;

/// Training column names, in model order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "Gender", "AGE", "Urea", "Cr", "HbA1c", "Chol", "TG", "HDL", "LDL", "VLDL", "BMI",
];

/// Columns the form never asks for; filled from [`DefaultMeans`].
pub const DEFAULTED_FEATURES: [&str; 5] = ["Urea", "Cr", "HDL", "LDL", "VLDL"];

pub const AGE_RANGE: RangeInclusive<i64> = 1..=120;
pub const HBA1C_RANGE: RangeInclusive<f64> = 0.0..=20.0;
pub const BMI_RANGE: RangeInclusive<f64> = 10.0..=60.0;
pub const CHOLESTEROL_RANGE: RangeInclusive<f64> = 50.0..=600.0;
pub const TRIGLYCERIDES_RANGE: RangeInclusive<f64> = 10.0..=2000.0;

/// Clinical values supplied by the caller for one prediction.
///
/// Field names match the JSON request body of `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientObservation {
    /// Age in whole years.
    pub age: i64,
    pub gender: String,
    /// Glycated haemoglobin, percent.
    pub hba1c: f64,
    pub bmi: f64,
    /// Total cholesterol, mg/dL.
    pub chol: f64,
    /// Triglycerides, mg/dL.
    pub tg: f64,
}

impl PatientObservation {
    /// Check every numeric field against its accepted range.
    ///
    /// All violations are collected into a single message.
    pub fn validate(&self) -> PredictResult<()> {
        let mut errors = Vec::new();

        if !AGE_RANGE.contains(&self.age) {
            errors.push(format!(
                "age {} out of range [{}, {}]",
                self.age,
                AGE_RANGE.start(),
                AGE_RANGE.end()
            ));
        }
        check_range(&mut errors, "hba1c", self.hba1c, &HBA1C_RANGE);
        check_range(&mut errors, "bmi", self.bmi, &BMI_RANGE);
        check_range(&mut errors, "chol", self.chol, &CHOLESTEROL_RANGE);
        check_range(&mut errors, "tg", self.tg, &TRIGLYCERIDES_RANGE);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PredictionError::Validation(errors.join("; ")))
        }
    }
}

fn check_range(errors: &mut Vec<String>, name: &str, value: f64, range: &RangeInclusive<f64>) {
    if !value.is_finite() {
        errors.push(format!("{name} must be a finite number"));
    } else if !range.contains(&value) {
        errors.push(format!(
            "{name} {value} out of range [{}, {}]",
            range.start(),
            range.end()
        ));
    }
}

/// Raw, unscaled model input in [`FEATURE_NAMES`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; N_FEATURES]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Value of a named training column.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.0[idx])
    }
}

impl From<[f64; N_FEATURES]> for FeatureVector {
    fn from(values: [f64; N_FEATURES]) -> Self {
        Self(values)
    }
}

/// Validate the observation and lay it out in training order.
pub fn assemble(
    obs: &PatientObservation,
    encoder: &GenderEncoder,
    means: &DefaultMeans,
) -> PredictResult<FeatureVector> {
    obs.validate()?;
    let gender = encoder.encode(&obs.gender)?;

    Ok(FeatureVector([
        gender,
        obs.age as f64,
        means.get("Urea"),
        means.get("Cr"),
        obs.hba1c,
        obs.chol,
        obs.tg,
        means.get("HDL"),
        means.get("LDL"),
        means.get("VLDL"),
        obs.bmi,
    ]))
}
