//! Error types for bsh

use thiserror::Error;

/// Result type alias for bsh operations
pub type ShResult<T> = Result<T, ShError>;

/// Error types for bsh shell operations
#[derive(Error, Debug)]
pub enum ShError {
    /// Corpus loading or bookmark persistence failed
    #[error(transparent)]
    Core(#[from] bsh_core::CoreError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] bsh_config::ConfigError),

    /// IO error (writing output, history, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Exit requested (not really an error)
    #[error("Exit with code {0}")]
    Exit(i32),
}
