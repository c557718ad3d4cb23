//! Error types for the Formgate service.

use thiserror::Error;

/// Main error type for Formgate operations.
#[derive(Error, Debug)]
pub enum FormgateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery errors
    #[error("Mail delivery error: {0}")]
    Mail(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Formgate operations.
pub type Result<T> = std::result::Result<T, FormgateError>;
