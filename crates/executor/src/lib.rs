//! Command execution layer for Quiver
//!
//! Every external operation is a [`Command`]; executing it yields an
//! [`Output`] or an [`Error`]. The [`Executor`] validates requests and maps
//! each one onto a single registry or collection call. The transport layer
//! serializes the same enums, and [`Quiver`] wraps them in typed methods for
//! embedded use.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod api;
mod command;
mod executor;
pub mod handlers;
mod output;


pub use api::Quiver;
pub use command::Command;
pub use executor::{Executor, ExecutorOptions};
pub use handlers::system::VERSION;
pub use output::{Output, ServerInfo};
pub use quiver_core::{Error, Result};
