//! Codec errors

use thiserror::Error;

/// Errors decoding a frame
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Frame is not valid JSON for the expected envelope
    #[error("malformed frame: {0}")]
    Malformed(String),

    /// Frame is not UTF-8
    #[error("frame is not valid UTF-8")]
    InvalidUtf8,
}

/// Errors encoding a frame
#[derive(Debug, Error)]
#[error("cannot encode frame: {0}")]
pub struct EncodeError(pub String);

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Malformed(e.to_string())
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(e: serde_json::Error) -> Self {
        EncodeError(e.to_string())
    }
}

impl From<DecodeError> for quiver_core::Error {
    fn from(e: DecodeError) -> Self {
        quiver_core::Error::InvalidArgument(e.to_string())
    }
}

impl From<EncodeError> for quiver_core::Error {
    fn from(e: EncodeError) -> Self {
        quiver_core::Error::Internal(e.to_string())
    }
}
