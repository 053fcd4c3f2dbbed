//! Error types for Gemini Relay

use thiserror::Error;

/// Main error type for relay operations
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration errors (config file, proxy URL validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL rewriting errors
    #[error("Rewrite error: {0}")]
    Rewrite(String),

    /// Transport construction errors
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
