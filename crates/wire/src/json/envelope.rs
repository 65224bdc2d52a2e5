//! Request and response envelopes
//!
//! ```json
//! {"id": 7, "tenant": "acme", "command": {"op": "heartbeat"}}
//! {"id": 7, "result": {"ok": {"kind": "timestamp", "value": 1700000000000000000}}}
//! {"id": 8, "result": {"err": {"code": "NotFound", "message": "not found: collection 'x'"}}}
//! ```
//!
//! The error object is the core `WireError`; its `code` maps 1:1 to an
//! `Error` variant, so clients rebuild the same error the server raised.

use quiver_core::{Error, Result, WireError};
use quiver_executor::{Command, Output};
use serde::{Deserialize, Serialize};

use super::error::{DecodeError, EncodeError};

/// Request id used when a frame is too broken to carry one
pub const UNKNOWN_REQUEST_ID: u64 = 0;

/// A client request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Client-chosen id, echoed in the response
    pub id: u64,
    /// Tenant label for logging; does not partition data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    /// Operation
    pub command: Command,
}

/// Outcome carried by a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireResult {
    /// Command succeeded
    Ok(Output),
    /// Command failed
    Err(WireError),
}

/// A server response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Id of the request this answers
    pub id: u64,
    /// Outcome
    pub result: WireResult,
}

impl Response {
    /// Response for an executed command
    pub fn from_result(id: u64, result: Result<Output>) -> Self {
        let result = match result {
            Ok(output) => WireResult::Ok(output),
            Err(e) => WireResult::Err(e.to_wire_error()),
        };
        Response { id, result }
    }

    /// Error response
    pub fn error(id: u64, error: &Error) -> Self {
        Response {
            id,
            result: WireResult::Err(error.to_wire_error()),
        }
    }

    /// Unwrap into the command outcome, rebuilding wire errors
    pub fn into_result(self) -> Result<Output> {
        match self.result {
            WireResult::Ok(output) => Ok(output),
            WireResult::Err(wire) => Err(Error::from_wire_error(&wire)),
        }
    }
}

/// Encode a request as one JSON line (without the trailing newline)
pub fn encode_request(request: &Request) -> std::result::Result<String, EncodeError> {
    Ok(serde_json::to_string(request)?)
}

/// Decode a request frame
pub fn decode_request(frame: &[u8]) -> std::result::Result<Request, DecodeError> {
    let text = std::str::from_utf8(frame).map_err(|_| DecodeError::InvalidUtf8)?;
    Ok(serde_json::from_str(text)?)
}

/// Encode a response as one JSON line (without the trailing newline)
pub fn encode_response(response: &Response) -> std::result::Result<String, EncodeError> {
    Ok(serde_json::to_string(response)?)
}

/// Decode a response frame
pub fn decode_response(frame: &[u8]) -> std::result::Result<Response, DecodeError> {
    let text = std::str::from_utf8(frame).map_err(|_| DecodeError::InvalidUtf8)?;
    Ok(serde_json::from_str(text)?)
}

/// Best-effort request id from a frame that failed to decode
///
/// Lets the server answer a request whose command is malformed under the id
/// the client is waiting on.
pub fn salvage_request_id(frame: &[u8]) -> u64 {
    serde_json::from_slice::<serde_json::Value>(frame)
        .ok()
        .and_then(|v| v.get("id").and_then(|id| id.as_u64()))
        .unwrap_or(UNKNOWN_REQUEST_ID)
}
