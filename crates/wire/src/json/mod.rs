//! JSON wire encoding for Quiver requests and responses
//!
//! - [`Request`]/[`Response`] envelopes around executor commands and outputs
//! - Newline-delimited framing with a size limit
//! - [`DecodeError`]/[`EncodeError`] mapped onto the core error taxonomy

mod envelope;
mod error;
mod frame;

pub use envelope::{
    decode_request, decode_response, encode_request, encode_response, salvage_request_id,
    Request, Response, WireResult, UNKNOWN_REQUEST_ID,
};
pub use error::{DecodeError, EncodeError};
pub use frame::{read_frame, write_frame, Frame, DEFAULT_MAX_FRAME_BYTES};
