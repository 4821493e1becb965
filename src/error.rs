//! Error types for the imla library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`ImlaError`] enum. Algorithms never use errors for control flow; an error
//! always means the caller asked for something that cannot be served.
//!
//! # Examples
//!
//! ```
//! use imla::error::{ImlaError, Result};
//!
//! fn reject_empty(text: &str) -> Result<()> {
//!     if text.trim().is_empty() {
//!         return Err(ImlaError::invalid_input("text must not be empty"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(reject_empty("").is_err());
//! assert!(reject_empty("salam").is_ok());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for imla operations.
#[derive(Error, Debug)]
pub enum ImlaError {
    /// Empty, oversized or otherwise unusable input, rejected at the boundary.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No dictionary snapshot has ever been loaded, so nothing can be served.
    #[error("Dictionary unavailable: {0}")]
    DictionaryUnavailable(String),

    /// The dictionary store failed to produce the vocabulary.
    #[error("Store error: {0}")]
    Store(String),

    /// Malformed records in a word list file.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (file stores, exports).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error, used by store closures.
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with ImlaError.
pub type Result<T> = std::result::Result<T, ImlaError>;

impl ImlaError {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        ImlaError::InvalidInput(msg.into())
    }

    /// Create a new dictionary unavailable error.
    pub fn dictionary_unavailable<S: Into<String>>(msg: S) -> Self {
        ImlaError::DictionaryUnavailable(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        ImlaError::Store(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        ImlaError::Parse(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ImlaError::Config(msg.into())
    }

    /// Whether this error means there is no dictionary to serve.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ImlaError::DictionaryUnavailable(_))
    }
}
