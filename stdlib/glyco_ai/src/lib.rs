//! Diabetes risk inference.
//!
//! Loads the trained artifacts once ([`ArtifactStore`]), turns a
//! [`PatientObservation`] into the fixed 11-feature vector the model expects
//! ([`assemble`]) and runs the fitted scaler and classifier over it
//! ([`predict`]).

pub mod artifacts;
pub mod classifier;
pub mod encoder;
pub mod error;
pub mod features;
pub mod inference;
pub mod means;
pub mod scaler;

pub use artifacts::{ArtifactPaths, ArtifactStore, DEFAULT_ARTIFACT_DIR};
pub use classifier::{load_classifier, Classifier, LogisticModel, TreeEnsemble};
pub use encoder::GenderEncoder;
pub use error::{ArtifactKind, LoadError, PredictResult, PredictionError};
pub use features::{assemble, FeatureVector, PatientObservation, FEATURE_NAMES, N_FEATURES};
pub use inference::{infer, predict, PredictionResult, RiskLabel};
pub use means::DefaultMeans;
pub use scaler::StandardScaler;
