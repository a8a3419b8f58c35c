//! Shared fixtures for the end-to-end tests.

use glyco_ai::{ArtifactPaths, ArtifactStore, PatientObservation};
use std::path::PathBuf;

/// The artifact set shipped at the workspace root.
pub fn artifact_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../artifacts")
}

pub fn load_store() -> ArtifactStore {
    let _ = env_logger::builder().is_test(true).try_init();
    ArtifactStore::initialize(&ArtifactPaths::in_dir(artifact_dir())).expect("shipped artifacts load")
}

pub fn observation(age: i64, gender: &str, hba1c: f64, bmi: f64, chol: f64, tg: f64) -> PatientObservation {
    PatientObservation {
        age,
        gender: gender.to_string(),
        hba1c,
        bmi,
        chol,
        tg,
    }
}
