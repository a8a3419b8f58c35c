//! The four trained artifacts, loaded once and shared read-only afterwards.

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use crate::classifier::{load_classifier, Classifier};
use crate::encoder::GenderEncoder;
use crate::error::{ArtifactKind, LoadError};
use crate::features::{DEFAULTED_FEATURES, N_FEATURES};
use crate::means::DefaultMeans;
use crate::scaler::StandardScaler;

pub const CLASSIFIER_FILE: &str = "diabetes_model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const GENDER_ENCODER_FILE: &str = "le_gender.json";
pub const DEFAULT_MEANS_FILE: &str = "column_means.json";

/// Directory the artifacts are read from unless told otherwise.
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

pub(crate) fn read_json<T: DeserializeOwned>(kind: ArtifactKind, path: &Path) -> Result<T, LoadError> {
    let s = read_to_string(path).map_err(|source| LoadError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&s).map_err(|source| LoadError::Json {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Locations of the four artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub classifier: PathBuf,
    pub scaler: PathBuf,
    pub gender_encoder: PathBuf,
    pub default_means: PathBuf,
}

impl ArtifactPaths {
    /// Standard file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            classifier: dir.join(CLASSIFIER_FILE),
            scaler: dir.join(SCALER_FILE),
            gender_encoder: dir.join(GENDER_ENCODER_FILE),
            default_means: dir.join(DEFAULT_MEANS_FILE),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_ARTIFACT_DIR)
    }
}

/// Immutable process-wide model state.
///
/// Built once by [`ArtifactStore::initialize`] before any request is served
/// and shared behind an `Arc`; there are no mutating methods.
#[derive(Debug)]
pub struct ArtifactStore {
    classifier: Box<dyn Classifier>,
    scaler: StandardScaler,
    gender_encoder: GenderEncoder,
    default_means: DefaultMeans,
}

impl ArtifactStore {
    /// Load all four artifacts. Any failure is fatal for serving.
    pub fn initialize(paths: &ArtifactPaths) -> Result<Self, LoadError> {
        let classifier = load_classifier(&paths.classifier)?;
        let scaler = StandardScaler::load(&paths.scaler)?;
        let gender_encoder = GenderEncoder::load(&paths.gender_encoder)?;
        let default_means = DefaultMeans::load(&paths.default_means)?;

        let store = Self::from_parts(classifier, scaler, gender_encoder, default_means);
        log::info!(
            "loaded {} classifier, {}-feature scaler, {} gender classes",
            store.classifier.backend_type(),
            store.scaler.width(),
            store.gender_encoder.classes().len()
        );
        Ok(store)
    }

    /// Assemble a store from already-built parts.
    pub fn from_parts(
        classifier: Box<dyn Classifier>,
        scaler: StandardScaler,
        gender_encoder: GenderEncoder,
        default_means: DefaultMeans,
    ) -> Self {
        let store = Self {
            classifier,
            scaler,
            gender_encoder,
            default_means,
        };
        store.warn_on_mismatch();
        store
    }

    // Mismatches are reported per request; this only makes them visible early.
    fn warn_on_mismatch(&self) {
        if self.scaler.width() != N_FEATURES {
            log::warn!(
                "scaler was fitted on {} features, pipeline produces {N_FEATURES}",
                self.scaler.width()
            );
        }
        if let Some(n) = self.classifier.n_features() {
            if n != N_FEATURES {
                log::warn!("classifier expects {n} features, pipeline produces {N_FEATURES}");
            }
        }
        for column in DEFAULTED_FEATURES {
            if !self.default_means.contains(column) {
                log::warn!("no default mean for {column}; using 0.0");
            }
        }
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn gender_encoder(&self) -> &GenderEncoder {
        &self.gender_encoder
    }

    pub fn default_means(&self) -> &DefaultMeans {
        &self.default_means
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_valid(dir: &Path) {
        fs::write(
            dir.join(CLASSIFIER_FILE),
            r#"{"coefficients":[0,0,0,0,1,0,0,0,0,0,0],"intercept":0}"#,
        )
        .unwrap();
        fs::write(
            dir.join(SCALER_FILE),
            format!(r#"{{"mean":{:?},"scale":{:?}}}"#, [0.0; 11], [1.0; 11]),
        )
        .unwrap();
        fs::write(dir.join(GENDER_ENCODER_FILE), r#"{"classes":["F","M"]}"#).unwrap();
        fs::write(dir.join(DEFAULT_MEANS_FILE), r#"{"Urea":4.5}"#).unwrap();
    }

    #[test]
    fn in_dir_uses_fixed_file_names() {
        let paths = ArtifactPaths::in_dir("/srv/model");
        assert_eq!(paths.classifier, PathBuf::from("/srv/model/diabetes_model.json"));
        assert_eq!(paths.default_means, PathBuf::from("/srv/model/column_means.json"));
        assert_eq!(ArtifactPaths::default(), ArtifactPaths::in_dir("artifacts"));
    }

    #[test]
    fn initialize_loads_every_artifact() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        write_valid(tmp.path());
        let store = ArtifactStore::initialize(&ArtifactPaths::in_dir(tmp.path())).expect("load");
        assert_eq!(store.classifier().backend_type(), "logistic");
        assert_eq!(store.scaler().width(), 11);
        assert_eq!(store.gender_encoder().display_options(), vec!["F", "M"]);
        assert_eq!(store.default_means().get("Urea"), 4.5);
    }

    #[test]
    fn missing_artifact_names_its_kind() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        write_valid(tmp.path());
        fs::remove_file(tmp.path().join(GENDER_ENCODER_FILE)).unwrap();
        let err = ArtifactStore::initialize(&ArtifactPaths::in_dir(tmp.path())).unwrap_err();
        assert!(matches!(err, LoadError::Io { kind: ArtifactKind::GenderEncoder, .. }));
    }

    #[test]
    fn corrupt_artifact_is_a_json_error() {
        let tmp = tempfile::tempdir().expect("tmpdir");
        write_valid(tmp.path());
        fs::write(tmp.path().join(SCALER_FILE), "{not json").unwrap();
        let err = ArtifactStore::initialize(&ArtifactPaths::in_dir(tmp.path())).unwrap_err();
        assert!(matches!(err, LoadError::Json { kind: ArtifactKind::Scaler, .. }));
    }
}
