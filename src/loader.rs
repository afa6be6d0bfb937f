//! Contract specification loading.

use std::path::Path;

use crate::error::LoadError;
use crate::types::ApiSpec;

/// Load a contract specification from a JSON file.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// `LoadError::ReadError` if it can't be read, or `LoadError::InvalidJson`
/// if it isn't a valid contract document.
pub fn load_spec(path: &Path) -> Result<ApiSpec, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_spec_str(&content)
}

/// Load a contract specification from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't a valid contract
/// document.
pub fn load_spec_str(content: &str) -> Result<ApiSpec, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}
