//! # Quiver
//!
//! Embeddable vector store with a line-delimited JSON server.
//!
//! Quiver stores named collections of records (id, vector, metadata,
//! document) and answers exact top-k nearest-neighbor queries under cosine,
//! euclidean or dot-product scoring, with optional metadata equality
//! filters. Mutations can be logged to a write-ahead log and replayed on
//! open.
//!
//! ## Quick Start
//!
//! ```ignore
//! use quiver::prelude::*;
//!
//! let db = Quiver::ephemeral();
//! db.create_collection("docs", CollectionOptions::new().dimension(3))?;
//! db.upsert("docs", vec![Record::new("a", vec![1.0, 0.0, 0.0])])?;
//!
//! let hits = db.query("docs", vec![vec![1.0, 0.0, 0.0]], 1, None)?;
//! assert_eq!(hits[0][0].id, "a");
//! ```
//!
//! ## Layers
//!
//! - [`core`]: types, errors, validation
//! - [`durability`]: write-ahead log
//! - [`engine`]: collections, registry, brute-force index
//! - [`executor`]: command dispatch and the typed [`Quiver`] wrapper
//! - [`wire`]: JSON envelope and framing
//! - [`server`] / [`client`]: TCP transport and remote [`Session`]

#![warn(missing_docs)]

pub mod prelude;

pub use quiver_client as client;
pub use quiver_core as core;
pub use quiver_durability as durability;
pub use quiver_engine as engine;
pub use quiver_executor as executor;
pub use quiver_server as server;
pub use quiver_wire as wire;

pub use quiver_client::{ClientConfig, Session};
pub use quiver_core::{
    CancellationToken, CollectionInfo, CollectionOptions, DistanceMetric, Error, ErrorCode,
    Metadata, MetadataFilter, MetadataValue, Record, Result, VectorMatch,
};
pub use quiver_durability::DurabilityMode;
pub use quiver_engine::{Database, DatabaseOptions};
pub use quiver_executor::{Command, Executor, ExecutorOptions, Output, Quiver, ServerInfo};
pub use quiver_server::{Server, ServerConfig};
