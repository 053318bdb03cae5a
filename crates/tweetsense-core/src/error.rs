//! Error types for TweetSense

use std::path::PathBuf;

/// Result type alias using TweetSense's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for TweetSense operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An artifact file is missing or could not be parsed at startup
    #[error("failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// An artifact parsed but its contents are inconsistent
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    /// A classifier produced a label outside the known set
    #[error("unexpected label {0}: expected one of -1, 0, 1, 2")]
    UnexpectedLabel(i64),

    /// A feature vector does not have the width a model was trained on
    #[error("feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// No model is registered under the requested name
    #[error("unknown model: {0}")]
    UnknownModel(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new load error for the artifact at `path`
    pub fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a new invalid-artifact error
    pub fn invalid_artifact(msg: impl Into<String>) -> Self {
        Self::InvalidArtifact(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error can only happen before the UI is shown
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            Self::Load { .. } | Self::InvalidArtifact(_) | Self::Config(_)
        )
    }
}
