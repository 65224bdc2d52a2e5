//! TCP transport for Quiver
//!
//! Accepts connections, decodes newline-delimited JSON request frames,
//! dispatches them to the executor and writes one response frame per request.
//! See `quiver-wire` for the frame format.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod server;

pub use config::{ServerConfig, DEFAULT_BIND};
pub use error::ServerError;
pub use server::Server;
