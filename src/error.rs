//! # Centralized Error Handling
//!
//! Unified error types for the entire crate using `thiserror`.
//!
//! The kernel itself is a total numeric function. Errors only arise at its
//! boundary (precondition checks) and in the surrounding I/O and CLI layers.

use thiserror::Error;

/// Main error type for pbtail operations
#[derive(Error, Debug)]
pub enum PbTailError {
    /// I/O errors (file missing, permission denied, read/write failures)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Kernel precondition violations (K > N, undersized input, bad probability)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Configuration errors (invalid CLI arguments)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Column file parse errors
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Type alias for Results using PbTailError
pub type Result<T> = std::result::Result<T, PbTailError>;

impl PbTailError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
