//! Error types for contract loading and comparison.

use std::path::PathBuf;
use thiserror::Error;

use crate::registry::EntityKind;

/// Errors during a comparison run.
#[derive(Debug, Error)]
pub enum DiffError {
    /// Both sides of an entity pair were absent. Always a caller bug:
    /// union construction over present keys can never produce this.
    #[error("cannot compare two absent entities")]
    InvalidComparison,

    /// An entity's kind has no row in the schema registry. Indicates drift
    /// between the contract model and the registry table.
    #[error("entity kind {kind:?} is not registered")]
    UnknownType { kind: EntityKind },

    /// Two elements on one side of a list share an identity-key value, so
    /// they cannot be matched unambiguously against the other side.
    #[error("duplicate identity key \"{key}\" in {field}")]
    DuplicateIdentityKey { field: String, key: String },
}

impl DiffError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        // Every comparison error is a structural/input error
        2
    }
}

/// Errors while loading a contract specification file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid contract JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}
