//! Error types for the SCP-079 core library.

use thiserror::Error;

/// Top-level error type for all engine operations.
///
/// None of these ever reach standard output as a failure: the engine
/// boundary turns them into the in-band error envelope.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The request payload was not valid JSON or had the wrong shape.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, EngineError>;
