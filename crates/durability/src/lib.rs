//! Durability layer for Quiver
//!
//! This crate implements write-ahead logging for the collection registry:
//! - [`WalEntry`]: CreateCollection, DropCollection, Upsert, DeleteRecords
//! - Entry framing with CRC32 checksums
//! - Durability modes: None, Strict, Batched (default)
//! - Recovery: replay of the longest valid prefix, torn tails truncated

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoding;
pub mod entry;
pub mod error;
pub mod mode;
pub mod wal;

pub use encoding::{decode_entry, encode_entry};
pub use entry::WalEntry;
pub use error::WalError;
pub use mode::DurabilityMode;
pub use wal::{Wal, WalReplay, WAL_FILE_NAME};
