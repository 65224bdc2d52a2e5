//! WAL entry framing
//!
//! ```text
//! +-----------+-----------+---------------------+
//! | len (u32) | crc (u32) | payload (len bytes) |
//! +-----------+-----------+---------------------+
//! ```
//!
//! Integers are little-endian. `crc` is the CRC32 of the payload; the payload
//! is the MessagePack encoding of a [`WalEntry`].

use crate::entry::WalEntry;
use crate::error::WalError;
use byteorder::{ByteOrder, LittleEndian};

/// Frame header size in bytes
pub const HEADER_LEN: usize = 8;

/// Upper bound on a single payload. Anything larger is treated as corruption.
pub const MAX_ENTRY_BYTES: usize = 256 * 1024 * 1024;

/// Encode an entry into a self-delimiting frame
pub fn encode_entry(entry: &WalEntry) -> Result<Vec<u8>, WalError> {
    let payload =
        rmp_serde::to_vec_named(entry).map_err(|e| WalError::Serialization(e.to_string()))?;
    if payload.len() > MAX_ENTRY_BYTES {
        return Err(WalError::Serialization(format!(
            "entry of {} bytes exceeds limit of {} bytes",
            payload.len(),
            MAX_ENTRY_BYTES
        )));
    }

    let mut frame = vec![0u8; HEADER_LEN + payload.len()];
    LittleEndian::write_u32(&mut frame[0..4], payload.len() as u32);
    LittleEndian::write_u32(&mut frame[4..8], crc32fast::hash(&payload));
    frame[HEADER_LEN..].copy_from_slice(&payload);
    Ok(frame)
}

/// Decode one frame from the front of `buf`.
///
/// `offset` is the file position of `buf[0]`, used only for error reporting.
/// Returns the entry and the number of bytes consumed.
pub fn decode_entry(buf: &[u8], offset: u64) -> Result<(WalEntry, usize), WalError> {
    if buf.len() < HEADER_LEN {
        return Err(WalError::Incomplete {
            offset,
            have: buf.len(),
            needed: HEADER_LEN,
        });
    }

    let len = LittleEndian::read_u32(&buf[0..4]) as usize;
    let expected_crc = LittleEndian::read_u32(&buf[4..8]);

    if len > MAX_ENTRY_BYTES {
        return Err(WalError::Corrupt {
            offset,
            reason: format!("frame length {} exceeds limit", len),
        });
    }

    let total = HEADER_LEN + len;
    if buf.len() < total {
        return Err(WalError::Incomplete {
            offset,
            have: buf.len(),
            needed: total,
        });
    }

    let payload = &buf[HEADER_LEN..total];
    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(WalError::Corrupt {
            offset,
            reason: format!(
                "checksum mismatch: expected {:08x}, got {:08x}",
                expected_crc, actual_crc
            ),
        });
    }

    let entry = rmp_serde::from_slice(payload).map_err(|e| WalError::Corrupt {
        offset,
        reason: format!("undecodable payload: {}", e),
    })?;

    Ok((entry, total))
}
