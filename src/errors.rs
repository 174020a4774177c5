//! Unified error types and result handling for the CMS core.
//!
//! All core operations fail soft: errors carry a human-readable message that
//! the response layer can surface as a flash message rather than a crash.

use crate::validate::ValidationErrors;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing problem
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// A requested record does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity table the lookup ran against
        entity: &'static str,
        /// The identifier (numeric id or slug) that missed
        id: String,
    },

    /// Input failed validation before any core operation ran
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// An upload could not be stored (unusable file name, write failure)
    #[error("Upload error: {message}")]
    Upload {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Database error from SeaORM; the message is surfaced verbatim to the
    /// caller in the gallery transactional path
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem error from the blob store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error during configuration
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
