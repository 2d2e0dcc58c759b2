use thiserror::Error as ThisError;

/// Errors that can occur while turning configuration into logger options
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed (opening a log file sink).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Level string could not be parsed.
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
