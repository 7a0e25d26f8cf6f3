//! Error types for the Unibot library.
//!
//! All fallible operations in this crate return [`Result`], whose error type is
//! the [`UnibotError`] enum. The chat pipeline itself never surfaces these to the
//! caller of [`ChatEngine::get_bot_response`](crate::chat::ChatEngine::get_bot_response);
//! they are recovered inside the pipeline and only reach callers at load time or at
//! the input boundary.
//!
//! # Examples
//!
//! ```
//! use unibot::error::{UnibotError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(UnibotError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Unibot operations.
#[derive(Error, Debug)]
pub enum UnibotError {
    /// I/O errors (file operations, network, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary model bundle decoding errors
    #[error("Bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Invalid or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Intent catalog errors (duplicate tags, empty responses, ...)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Model bundle errors (shape mismatches, wrong input length, ...)
    #[error("Model error: {0}")]
    Model(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Spelling correction failed or was refused
    #[error("Correction error: {0}")]
    Correction(String),

    /// The data collaborator could not answer
    #[error("Data unavailable: {0}")]
    Store(String),

    /// Empty or missing utterance at the input boundary
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with UnibotError.
pub type Result<T> = std::result::Result<T, UnibotError>;

impl UnibotError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        UnibotError::Config(msg.into())
    }

    /// Create a new catalog error.
    pub fn catalog<S: Into<String>>(msg: S) -> Self {
        UnibotError::Catalog(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        UnibotError::Model(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        UnibotError::Analysis(msg.into())
    }

    /// Create a new correction error.
    pub fn correction<S: Into<String>>(msg: S) -> Self {
        UnibotError::Correction(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        UnibotError::Store(msg.into())
    }

    /// Create a new malformed input error.
    pub fn malformed_input<S: Into<String>>(msg: S) -> Self {
        UnibotError::MalformedInput(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        UnibotError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        UnibotError::Other(msg.into())
    }

    /// Whether this error was produced by the data collaborator.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, UnibotError::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = UnibotError::catalog("duplicate tag");
        assert_eq!(error.to_string(), "Catalog error: duplicate tag");

        let error = UnibotError::model("bad shape");
        assert_eq!(error.to_string(), "Model error: bad shape");

        let error = UnibotError::store("connection refused");
        assert_eq!(error.to_string(), "Data unavailable: connection refused");
        assert!(error.is_data_unavailable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let unibot_error = UnibotError::from(io_error);

        match unibot_error {
            UnibotError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
