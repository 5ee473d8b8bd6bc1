use crate::{ConfigError, ConfigErrorResult, DEFAULT_STORAGE_PATH};

use std::path::PathBuf;

use serde::Deserialize;

/// Location of the patient data file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: String::from(DEFAULT_STORAGE_PATH),
        }
    }
}

impl StorageConfig {
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::storage("storage.path must not be empty"));
        }

        if self.path.ends_with('/') || self.path.ends_with('\\') {
            return Err(ConfigError::storage(format!(
                "storage.path must name a file, got directory {}",
                self.path
            )));
        }

        Ok(())
    }
}
