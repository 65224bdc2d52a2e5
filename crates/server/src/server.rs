//! TCP server
//!
//! One task per connection. Each connection has a reader task that frames
//! incoming lines into a channel and a processing loop that executes them in
//! order on the blocking pool. When the reader sees the peer go away it
//! cancels the connection token; every request runs under a child of that
//! token, so a long query stops scanning and releases its collection lock.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use quiver_core::{CancellationToken, Error};
use quiver_engine::Database;
use quiver_executor::Executor;
use quiver_wire::{
    decode_request, read_frame, salvage_request_id, write_frame, Frame, Request, Response,
    UNKNOWN_REQUEST_ID,
};
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, warn, Instrument, Span};

use crate::config::ServerConfig;
use crate::error::ServerError;

/// Frames buffered per connection ahead of processing
const PIPELINE_DEPTH: usize = 32;

enum Incoming {
    Line(Vec<u8>),
    TooLarge,
}

/// A bound, not yet serving, Quiver server
pub struct Server {
    listener: TcpListener,
    executor: Executor,
    max_frame_bytes: usize,
}

impl Server {
    /// Open the database described by `config` and bind its listen address
    pub async fn bind(config: &ServerConfig) -> Result<Server, ServerError> {
        config.validate()?;

        let db_options = config.database_options();
        let db = tokio::task::spawn_blocking(move || Database::open(db_options))
            .await
            .map_err(|e| Error::Internal(format!("database open task failed: {}", e)))??;
        let executor = Executor::with_options(Arc::new(db), config.executor_options());

        let listener = TcpListener::bind(&config.bind).await?;
        Ok(Server::new(listener, executor, config.max_frame_bytes))
    }

    /// Serve `executor` on an already bound listener
    pub fn new(listener: TcpListener, executor: Executor, max_frame_bytes: usize) -> Server {
        Server {
            listener,
            executor,
            max_frame_bytes,
        }
    }

    /// Address the server is listening on
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Executor requests are dispatched to
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Serve until the process exits
    pub async fn serve(self) -> Result<(), ServerError> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Serve until `shutdown` completes
    ///
    /// Open connections keep running on their own tasks; the WAL is synced
    /// before returning.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let addr = self.listener.local_addr()?;
        info!(%addr, durable = self.executor.database().is_durable(), "Quiver server listening");

        let db = self.executor.database();
        let syncer = db
            .sync_interval()
            .map(|interval| tokio::spawn(sync_periodically(db.clone(), interval)));

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        if let Err(e) = stream.set_nodelay(true) {
                            debug!(%peer, error = %e, "set_nodelay failed");
                        }
                        debug!(%peer, "Accepted connection");
                        let executor = self.executor.clone();
                        let max_frame_bytes = self.max_frame_bytes;
                        tokio::spawn(
                            handle_connection(stream, executor, max_frame_bytes)
                                .instrument(info_span!("connection", %peer)),
                        );
                    }
                    Err(e) => {
                        warn!(error = %e, "Accept failed");
                        tokio::time::sleep(Duration::from_millis(50)).await;
                    }
                }
            }
        }

        if let Some(syncer) = syncer {
            syncer.abort();
        }
        self.executor.database().flush()?;
        Ok(())
    }
}

/// Fsync batched appends that no later append came along to flush
async fn sync_periodically(db: Arc<Database>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let db = db.clone();
        match tokio::task::spawn_blocking(move || db.sync_if_due()).await {
            Ok(Ok(true)) => debug!("Periodic WAL sync"),
            Ok(Ok(false)) => {}
            Ok(Err(e)) => warn!(error = %e, "Periodic WAL sync failed"),
            Err(e) => warn!(error = %e, "Periodic WAL sync task failed"),
        }
    }
}

async fn handle_connection(stream: TcpStream, executor: Executor, max_frame_bytes: usize) {
    let (read_half, mut write_half) = stream.into_split();
    let (frames_tx, mut frames_rx) = mpsc::channel(PIPELINE_DEPTH);
    let disconnected = CancellationToken::new();
    let reader_disconnected = disconnected.clone();

    let reader = tokio::spawn(
        async move {
            let mut reader = BufReader::new(read_half);
            loop {
                let incoming = match read_frame(&mut reader, max_frame_bytes).await {
                    Ok(Frame::Line(line)) => Incoming::Line(line),
                    Ok(Frame::TooLarge) => Incoming::TooLarge,
                    Ok(Frame::Eof) => break,
                    Err(e) => {
                        debug!(error = %e, "Read failed");
                        break;
                    }
                };
                let stop = matches!(incoming, Incoming::TooLarge);
                if frames_tx.send(incoming).await.is_err() || stop {
                    break;
                }
            }
            reader_disconnected.cancel();
        }
        .in_current_span(),
    );

    while let Some(incoming) = frames_rx.recv().await {
        let line = match incoming {
            Incoming::Line(line) => line,
            Incoming::TooLarge => {
                warn!(max_frame_bytes, "Frame too large, closing connection");
                let err = Error::InvalidArgument(format!(
                    "frame exceeds {} bytes",
                    max_frame_bytes
                ));
                let _ = write_frame(&mut write_half, &Response::error(UNKNOWN_REQUEST_ID, &err)).await;
                break;
            }
        };
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let response = match decode_request(&line) {
            Ok(request) => {
                let span = info_span!(
                    "request",
                    id = request.id,
                    tenant = request.tenant.as_deref().unwrap_or("-"),
                    command = request.command.name(),
                );
                execute(&executor, request, &disconnected)
                    .instrument(span)
                    .await
            }
            Err(e) => {
                let id = salvage_request_id(&line);
                debug!(id, error = %e, "Malformed request");
                Response::error(id, &e.into())
            }
        };

        if let Err(e) = write_frame(&mut write_half, &response).await {
            debug!(error = %e, "Write failed, closing connection");
            break;
        }
    }

    reader.abort();
    debug!("Connection closed");
}

async fn execute(
    executor: &Executor,
    request: Request,
    disconnected: &CancellationToken,
) -> Response {
    let id = request.id;
    let token = disconnected.child_token();
    let task_token = token.clone();
    let executor = executor.clone();
    let span = Span::current();

    let mut task = tokio::task::spawn_blocking(move || {
        span.in_scope(|| executor.execute_with(request.command, &task_token))
    });

    let joined = tokio::select! {
        joined = &mut task => joined,
        _ = token.cancelled() => {
            debug!("Peer disconnected, cancelling request");
            task.await
        }
    };

    let result = joined.unwrap_or_else(|e| {
        Err(Error::Internal(format!("request task failed: {}", e)))
    });
    Response::from_result(id, result)
}
