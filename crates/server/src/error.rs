//! Server errors

use thiserror::Error;

/// Errors starting or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration is unreadable or invalid
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Database failed to open
    #[error("database: {0}")]
    Database(#[from] quiver_core::Error),

    /// Socket error
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}
