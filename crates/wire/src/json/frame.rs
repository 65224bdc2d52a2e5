//! Newline-delimited framing over async streams
//!
//! One JSON document per line. A frame longer than the configured limit is
//! reported as [`Frame::TooLarge`] without buffering the rest of it; the
//! stream is then out of sync and the caller must close it.

use serde::Serialize;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Default upper bound on one frame (16 MiB)
pub const DEFAULT_MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// Result of reading one frame
#[derive(Debug, PartialEq, Eq)]
pub enum Frame {
    /// One line, without its terminator
    Line(Vec<u8>),
    /// Peer closed the stream cleanly
    Eof,
    /// Line exceeded the limit
    TooLarge,
}

/// Read one newline-terminated frame of at most `max_frame_bytes`
///
/// A final line without a terminator is returned as a frame.
pub async fn read_frame<R>(reader: &mut R, max_frame_bytes: usize) -> io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    let limit = max_frame_bytes as u64 + 1;
    let mut buf = Vec::new();
    let n = (&mut *reader).take(limit).read_until(b'\n', &mut buf).await?;

    if n == 0 {
        return Ok(Frame::Eof);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        return Ok(Frame::Line(buf));
    }
    if buf.len() as u64 >= limit {
        return Ok(Frame::TooLarge);
    }
    Ok(Frame::Line(buf))
}

/// Serialize `value` as one line and flush it
pub async fn write_frame<W, T>(writer: &mut W, value: &T) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut bytes =
        serde_json::to_vec(value).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    bytes.push(b'\n');
    writer.write_all(&bytes).await?;
    writer.flush().await
}
