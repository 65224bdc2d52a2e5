//! Remote client for a Quiver server
//!
//! A [`Session`] holds one TCP connection and exposes the same typed
//! operations as the embedded `Quiver` wrapper, as async methods.
//!
//! ```ignore
//! use quiver_client::{ClientConfig, Session};
//! use quiver_core::CollectionOptions;
//!
//! let mut session = Session::connect(ClientConfig::new().port(8000)).await?;
//! session.heartbeat().await?;
//! session.create_collection("docs", CollectionOptions::new().dimension(3)).await?;
//! session.close().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod api;
pub mod config;
pub mod session;

pub use config::{ClientConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TIMEOUT};
pub use session::Session;

/// Errors surfaced to client callers; server errors keep their kind
pub type ClientError = quiver_core::Error;
