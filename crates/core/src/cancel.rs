//! Cooperative cancellation
//!
//! The transport hands a token to every request it dispatches and cancels it
//! when the peer disconnects. Long scans poll the token from the blocking
//! pool and bail out early.

use crate::error::{Error, Result};

pub use tokio_util::sync::CancellationToken;

/// Return `Unavailable` if `token` was cancelled
pub fn check_cancelled(token: &CancellationToken) -> Result<()> {
    if token.is_cancelled() {
        return Err(Error::Unavailable("request cancelled".to_string()));
    }
    Ok(())
}
