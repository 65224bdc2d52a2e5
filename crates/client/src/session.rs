//! Session: one TCP connection to a Quiver server
//!
//! Requests are sent one at a time; each waits for its response before the
//! next goes out. A transport failure or a timeout leaves the stream in an
//! unknown state, so the session marks itself closed and every later call
//! fails with `Unavailable`. Open a new session to recover.

use quiver_core::{Error, Result};
use quiver_executor::{Command, Output};
use quiver_wire::{
    decode_response, read_frame, write_frame, Frame, Request, Response, DEFAULT_MAX_FRAME_BYTES,
    UNKNOWN_REQUEST_ID,
};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::config::ClientConfig;

/// An open connection
pub struct Session {
    config: ClientConfig,
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    next_id: u64,
    closed: bool,
}

impl Session {
    /// Connect to the server named by `config`
    ///
    /// # Errors
    /// - `Timeout` if the connection is not established within `config.timeout`
    /// - `Unavailable` if the server cannot be reached
    pub async fn connect(config: ClientConfig) -> Result<Session> {
        let addr = config.address();
        let stream = timeout(config.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| {
                Error::Timeout(format!(
                    "connecting to {} took longer than {:?}",
                    addr, config.timeout
                ))
            })?
            .map_err(|e| Error::Unavailable(format!("cannot connect to {}: {}", addr, e)))?;

        if let Err(e) = stream.set_nodelay(true) {
            debug!(error = %e, "set_nodelay failed");
        }
        debug!(%addr, tenant = config.tenant.as_deref().unwrap_or("-"), "Connected");

        let (read_half, write_half) = stream.into_split();
        Ok(Session {
            config,
            reader: BufReader::new(read_half),
            writer: write_half,
            next_id: 1,
            closed: false,
        })
    }

    /// Configuration the session was opened with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check if the session can still send requests
    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Send one command and wait for its outcome
    pub async fn execute(&mut self, command: Command) -> Result<Output> {
        if self.closed {
            return Err(Error::Unavailable("session is closed".into()));
        }

        let id = self.next_id;
        self.next_id += 1;
        let request = Request {
            id,
            tenant: self.config.tenant.clone(),
            command,
        };

        let response = match timeout(self.config.timeout, self.round_trip(&request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                self.closed = true;
                return Err(e);
            }
            Err(_) => {
                self.closed = true;
                return Err(Error::Timeout(format!(
                    "{} got no response within {:?}",
                    request.command.name(),
                    self.config.timeout
                )));
            }
        };

        if response.id != id {
            // The server answers under id 0 only right before closing.
            self.closed = true;
            if response.id != UNKNOWN_REQUEST_ID {
                return Err(Error::Internal(format!(
                    "response id {} does not match request id {}",
                    response.id, id
                )));
            }
        }
        response.into_result()
    }

    async fn round_trip(&mut self, request: &Request) -> Result<Response> {
        write_frame(&mut self.writer, request)
            .await
            .map_err(|e| Error::Unavailable(format!("send failed: {}", e)))?;

        match read_frame(&mut self.reader, DEFAULT_MAX_FRAME_BYTES)
            .await
            .map_err(|e| Error::Unavailable(format!("receive failed: {}", e)))?
        {
            Frame::Line(line) => decode_response(&line)
                .map_err(|e| Error::Internal(format!("undecodable response: {}", e))),
            Frame::Eof => Err(Error::Unavailable("server closed the connection".into())),
            Frame::TooLarge => Err(Error::Internal(format!(
                "response exceeds {} bytes",
                DEFAULT_MAX_FRAME_BYTES
            ))),
        }
    }

    /// Close the connection
    pub async fn close(mut self) -> Result<()> {
        self.closed = true;
        self.writer
            .shutdown()
            .await
            .map_err(|e| Error::Unavailable(format!("close failed: {}", e)))
    }
}
