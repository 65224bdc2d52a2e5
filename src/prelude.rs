//! Convenient imports for Quiver.
//!
//! ```ignore
//! use quiver::prelude::*;
//!
//! let db = Quiver::open(DatabaseOptions::new().data_dir("./quiver-data"))?;
//! ```

// Entry points
pub use crate::{Database, DatabaseOptions, Quiver};

// Remote use
pub use crate::{ClientConfig, Server, ServerConfig, Session};

// Error handling
pub use crate::{Error, Result};

// Data model
pub use crate::{
    CollectionInfo, CollectionOptions, DistanceMetric, DurabilityMode, Metadata, MetadataFilter,
    MetadataValue, Record, VectorMatch,
};
