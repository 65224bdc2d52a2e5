//! WAL errors

use thiserror::Error;

/// Errors raised by the write-ahead log
#[derive(Debug, Error)]
pub enum WalError {
    /// Underlying file I/O failed
    #[error("wal i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry could not be encoded
    #[error("wal serialization error: {0}")]
    Serialization(String),

    /// Frame is cut short (torn write at the tail)
    #[error("incomplete wal entry at offset {offset}: need {needed} bytes, have {have}")]
    Incomplete {
        /// File offset of the frame
        offset: u64,
        /// Bytes available
        have: usize,
        /// Bytes required
        needed: usize,
    },

    /// Frame fails its checksum or does not decode
    #[error("corrupt wal entry at offset {offset}: {reason}")]
    Corrupt {
        /// File offset of the frame
        offset: u64,
        /// What was wrong
        reason: String,
    },
}

impl From<WalError> for quiver_core::Error {
    fn from(e: WalError) -> Self {
        quiver_core::Error::Internal(e.to_string())
    }
}
