//! Core types for the Quiver vector store
//!
//! This crate defines the vocabulary shared by every other layer:
//! - [`DistanceMetric`], [`CollectionOptions`], [`CollectionInfo`]: collection model
//! - [`Record`], [`VectorMatch`]: stored records and ranked query results
//! - [`Metadata`], [`MetadataValue`], [`MetadataFilter`]: scalar payload and filters
//! - [`Error`]: the error taxonomy, stable across the wire via [`WireError`]
//! - [`CancellationToken`]: cooperative cancellation for long-running reads
//!
//! Implementation logic (scoring, indexing, durability) lives in the engine
//! and durability crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cancel;
pub mod clock;
pub mod error;
pub mod metadata;
pub mod types;
pub mod validation;

pub use cancel::{check_cancelled, CancellationToken};
pub use error::{Error, ErrorCode, Result, WireError};
pub use metadata::{Metadata, MetadataFilter, MetadataValue};
pub use types::{CollectionInfo, CollectionOptions, DistanceMetric, Record, VectorMatch};
