//! Policy engine error types.
//!
//! Lookups that do not resolve are surfaced immediately as one of the
//! `*NotFound` variants. Everything inside the substitution and composition
//! paths degrades to placeholder text instead of erroring, so the remaining
//! variants cover collaborators (stores, enhancers) and library loading.

use std::path::PathBuf;

use grc_core::{ClientId, TemplateId, ValidationError};
use thiserror::Error;

/// Errors that can occur during policy generation.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// No client profile exists for the requested id.
    #[error("client not found: {id}")]
    ClientNotFound { id: ClientId },

    /// No template exists for the requested id.
    #[error("template not found: {id}")]
    TemplateNotFound { id: TemplateId },

    /// A template store or client profile provider failed.
    #[error("store error: {detail}")]
    Store { detail: String },

    /// A text enhancer failed to tailor content.
    #[error("enhancement failed: {detail}")]
    Enhancement { detail: String },

    /// A required file was not found.
    #[error("required file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Library content is structurally invalid (duplicate ids, unsupported files).
    #[error("validation error: {0}")]
    Validation(String),

    /// Core primitive rejected its input.
    #[error("invalid input: {0}")]
    Core(#[from] ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PolicyError {
    /// Whether this error is the "lookup did not resolve" kind.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ClientNotFound { .. } | Self::TemplateNotFound { .. }
        )
    }
}

/// Result type alias for policy engine operations.
pub type PolicyResult<T> = Result<T, PolicyError>;
