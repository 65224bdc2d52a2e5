//! Error taxonomy for Quiver
//!
//! Every public operation returns [`Error`]. Each variant maps to exactly one
//! [`ErrorCode`], and the code is what travels over the wire:
//!
//! ```json
//! {
//!   "code": "DimensionMismatch",
//!   "message": "dimension mismatch: expected 3, got 4",
//!   "details": {"expected": 3, "actual": 4}
//! }
//! ```
//!
//! ## Error Codes (Canonical)
//!
//! | Code | Description | Retryable |
//! |------|-------------|-----------|
//! | NotFound | Collection or record missing | no |
//! | AlreadyExists | Duplicate collection name | no |
//! | DimensionMismatch | Vector length violates the collection contract | no |
//! | InvalidArgument | Malformed name, k < 1, empty vector, ... | no |
//! | Unavailable | Server unreachable, connection failure, cancelled request | yes |
//! | Timeout | Lock or I/O wait exceeded its bound | yes |
//! | Internal | Bug, I/O failure or storage corruption | no |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All Quiver errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Collection or record not found
    #[error("not found: {0}")]
    NotFound(String),

    /// A collection with this name already exists
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Vector length does not match the collection's dimension
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension fixed on the collection
        expected: usize,
        /// Length of the offending vector
        actual: usize,
    },

    /// Malformed request (bad name, k < 1, empty vector, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Server unreachable, connection lost, or request cancelled
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Lock acquisition or I/O wait exceeded its bound
    #[error("timeout: {0}")]
    Timeout(String),

    /// Internal error (bug, I/O failure, storage corruption)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for Quiver operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Collection-not-found error for `name`
    pub fn collection_not_found(name: &str) -> Self {
        Error::NotFound(format!("collection '{}'", name))
    }

    /// Record-not-found error for `id` in `collection`
    pub fn record_not_found(collection: &str, id: &str) -> Self {
        Error::NotFound(format!("record '{}' in collection '{}'", id, collection))
    }

    /// Get the canonical error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::NotFound(_) => ErrorCode::NotFound,
            Error::AlreadyExists(_) => ErrorCode::AlreadyExists,
            Error::DimensionMismatch { .. } => ErrorCode::DimensionMismatch,
            Error::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Error::Unavailable(_) => ErrorCode::Unavailable,
            Error::Timeout(_) => ErrorCode::Timeout,
            Error::Internal(_) => ErrorCode::Internal,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only `Unavailable` and `Timeout` may succeed on retry. The core never
    /// retries on its own; backoff is the caller's decision.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Unavailable(_) | Error::Timeout(_))
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is a serious/unrecoverable error.
    pub fn is_serious(&self) -> bool {
        matches!(self, Error::Internal(_))
    }

    /// Convert to wire error format
    pub fn to_wire_error(&self) -> WireError {
        let details = match self {
            Error::DimensionMismatch { expected, actual } => Some(serde_json::json!({
                "expected": expected,
                "actual": actual,
            })),
            _ => None,
        };

        WireError {
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }

    /// Rebuild an error from its wire form.
    ///
    /// The message of a decoded error is the full display string of the
    /// original, so the payload is recovered by stripping the variant prefix.
    pub fn from_wire_error(wire: &WireError) -> Self {
        let payload = strip_prefix(wire.code, &wire.message);
        match wire.code {
            ErrorCode::NotFound => Error::NotFound(payload),
            ErrorCode::AlreadyExists => Error::AlreadyExists(payload),
            ErrorCode::DimensionMismatch => {
                let field = |name: &str| {
                    wire.details
                        .as_ref()
                        .and_then(|d| d.get(name))
                        .and_then(|v| v.as_u64())
                        .map(|v| v as usize)
                };
                match (field("expected"), field("actual")) {
                    (Some(expected), Some(actual)) => Error::DimensionMismatch { expected, actual },
                    _ => Error::InvalidArgument(wire.message.clone()),
                }
            }
            ErrorCode::InvalidArgument => Error::InvalidArgument(payload),
            ErrorCode::Unavailable => Error::Unavailable(payload),
            ErrorCode::Timeout => Error::Timeout(payload),
            ErrorCode::Internal => Error::Internal(payload),
        }
    }
}

fn strip_prefix(code: ErrorCode, message: &str) -> String {
    let prefix = match code {
        ErrorCode::NotFound => "not found: ",
        ErrorCode::AlreadyExists => "already exists: ",
        ErrorCode::InvalidArgument => "invalid argument: ",
        ErrorCode::Unavailable => "unavailable: ",
        ErrorCode::Timeout => "timeout: ",
        ErrorCode::Internal => "internal error: ",
        ErrorCode::DimensionMismatch => "",
    };
    message.strip_prefix(prefix).unwrap_or(message).to_string()
}

/// Canonical error codes. These names are frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Collection or record missing
    NotFound,
    /// Duplicate collection name
    AlreadyExists,
    /// Vector length violates the collection contract
    DimensionMismatch,
    /// Malformed request
    InvalidArgument,
    /// Server unreachable or request cancelled
    Unavailable,
    /// Wait bound exceeded
    Timeout,
    /// Unexpected failure
    Internal,
}

impl ErrorCode {
    /// Code as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NotFound",
            ErrorCode::AlreadyExists => "AlreadyExists",
            ErrorCode::DimensionMismatch => "DimensionMismatch",
            ErrorCode::InvalidArgument => "InvalidArgument",
            ErrorCode::Unavailable => "Unavailable",
            ErrorCode::Timeout => "Timeout",
            ErrorCode::Internal => "Internal",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire error representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    /// The canonical error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidArgument(format!("malformed json: {}", e))
    }
}
