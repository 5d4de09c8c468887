//! Error types shared by the training and inference pipeline.

use std::path::PathBuf;

use thiserror::Error;

pub type RiskResult<T> = Result<T, RiskError>;

#[derive(Debug, Error)]
pub enum RiskError {
    /// Dataset or artifact missing/unreadable
    #[error("cannot access {}: {source}", path.display())]
    DataAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed dataset content
    #[error("invalid dataset: {0}")]
    Dataset(String),

    /// Malformed feature input (one request only)
    #[error("invalid input: {0}")]
    Validation(String),

    /// Training could not produce a model
    #[error("model fit failed: {0}")]
    ModelFit(String),

    /// Artifact could not be encoded, decoded or verified
    #[error("model artifact error: {0}")]
    Artifact(String),
}

impl RiskError {
    pub fn data_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RiskError::DataAccess {
            path: path.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, RiskError::Validation(_))
    }

    pub fn is_data_access(&self) -> bool {
        matches!(self, RiskError::DataAccess { .. })
    }
}

impl From<csv::Error> for RiskError {
    fn from(err: csv::Error) -> Self {
        RiskError::Dataset(err.to_string())
    }
}

impl From<bincode::Error> for RiskError {
    fn from(err: bincode::Error) -> Self {
        RiskError::Artifact(err.to_string())
    }
}
