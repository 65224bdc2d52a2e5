//! Collection registry and vector store engine for Quiver
//!
//! - [`Database`]: registry plus optional WAL, opened with [`DatabaseOptions`]
//! - [`Registry`]: name -> [`Collection`], owns name uniqueness
//! - [`Collection`]: records, upsert/delete/get and nearest-neighbor query
//! - [`VectorIndexBackend`]: swappable index, [`BruteForceBackend`] today

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod brute_force;
pub mod collection;
pub mod database;
pub mod distance;
pub mod options;
pub mod registry;

pub use backend::{IndexBackendFactory, RecordSeq, VectorIndexBackend};
pub use brute_force::BruteForceBackend;
pub use collection::{Collection, CollectionHandle};
pub use database::Database;
pub use options::{DatabaseOptions, DEFAULT_LOCK_TIMEOUT};
pub use registry::Registry;
