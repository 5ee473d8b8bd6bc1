use pt_core::PatientId;

use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("patient with GUID {guid} not found {location}")]
    NotFound {
        guid: PatientId,
        location: ErrorLocation,
    },

    #[error("IO error on {path}: {source} {location}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("JSON error in {path}: {source} {location}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Display text without the source location, safe to hand to clients
    pub fn detail(&self) -> String {
        match self {
            StoreError::NotFound { guid, .. } => format!("patient with GUID {guid} not found"),
            StoreError::Io { path, source, .. } => {
                format!("IO error on {}: {}", path.display(), source)
            }
            StoreError::Json { path, source, .. } => {
                format!("JSON error in {}: {}", path.display(), source)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
