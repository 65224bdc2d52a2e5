//! Wire encoding for Quiver
//!
//! This crate implements the wire contract shared by the server and the
//! client: newline-delimited JSON frames, one request or response per line.
//!
//! ## Wire Encoding Rules
//!
//! | Frame | JSON Encoding |
//! |-------|---------------|
//! | Request | `{"id": u64, "tenant": string?, "command": {"op": ..., ...}}` |
//! | Success | `{"id": u64, "result": {"ok": {"kind": ..., "value": ...}}}` |
//! | Failure | `{"id": u64, "result": {"err": {"code": ..., "message": ...}}}` |
//!
//! ## Examples
//!
//! ```
//! use quiver_wire::{decode_request, encode_request, Request};
//! use quiver_executor::Command;
//!
//! let req = Request { id: 1, tenant: None, command: Command::Heartbeat };
//! let json = encode_request(&req).unwrap();
//! assert_eq!(json, r#"{"id":1,"command":{"op":"heartbeat"}}"#);
//! assert_eq!(decode_request(json.as_bytes()).unwrap(), req);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod json;

// Re-export main types
pub use json::{
    decode_request, decode_response, encode_request, encode_response, read_frame,
    salvage_request_id, write_frame, DecodeError, EncodeError, Frame, Request, Response,
    WireResult, DEFAULT_MAX_FRAME_BYTES, UNKNOWN_REQUEST_ID,
};
