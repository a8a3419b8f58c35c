//! Error taxonomy for the inference pipeline.
//!
//! [`LoadError`] is raised while the artifact store is built and is fatal to
//! the process. [`PredictionError`] belongs to a single request.

use std::path::PathBuf;

/// Which of the four trained artifacts an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Classifier,
    Scaler,
    GenderEncoder,
    DefaultMeans,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ArtifactKind::Classifier => "classifier",
            ArtifactKind::Scaler => "scaler",
            ArtifactKind::GenderEncoder => "gender encoder",
            ArtifactKind::DefaultMeans => "default means",
        };
        f.write_str(name)
    }
}

/// Startup failure: an artifact is missing, unreadable or malformed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {kind} artifact at {path:?}: {source}")]
    Io {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} artifact at {path:?} is not valid JSON: {source}")]
    Json {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} artifact at {path:?} is corrupt: {message}")]
    Corrupt {
        kind: ArtifactKind,
        path: PathBuf,
        message: String,
    },
}

impl LoadError {
    pub fn corrupt(kind: ArtifactKind, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LoadError::Corrupt {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }

    /// The artifact the failure refers to.
    pub fn kind(&self) -> ArtifactKind {
        match self {
            LoadError::Io { kind, .. } | LoadError::Json { kind, .. } | LoadError::Corrupt { kind, .. } => {
                *kind
            }
        }
    }
}

/// Request-level failure. Never affects other requests or the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    /// The gender value is not one of the encoder's known classes.
    #[error("unknown gender category {0:?}")]
    UnknownCategory(String),

    /// Malformed or out-of-range input.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Scaler or classifier could not process the assembled vector.
    #[error("inference failed: {0}")]
    Inference(String),
}

impl PredictionError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        PredictionError::Validation(msg.into())
    }

    pub fn inference<T: Into<String>>(msg: T) -> Self {
        PredictionError::Inference(msg.into())
    }
}

/// Result alias used across the request path.
pub type PredictResult<T> = Result<T, PredictionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_message_names_the_value() {
        let err = PredictionError::UnknownCategory("X".into());
        assert_eq!(err.to_string(), "unknown gender category \"X\"");
    }

    #[test]
    fn corrupt_load_error_keeps_kind() {
        let err = LoadError::corrupt(ArtifactKind::Scaler, "scaler.json", "mean/scale length mismatch");
        assert_eq!(err.kind(), ArtifactKind::Scaler);
        assert!(err.to_string().contains("scaler artifact"));
        assert!(err.to_string().contains("mean/scale length mismatch"));
    }
}
