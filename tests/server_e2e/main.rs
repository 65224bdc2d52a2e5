//! Server End-to-End Test Suite
//!
//! Runs a real server on an ephemeral port and talks to it through the
//! client session or a raw socket:
//! - session: typed operations over the wire
//! - errors: error kinds survive the round trip
//! - framing: malformed and oversized frames
//! - lifecycle: durable restart, concurrent sessions

use quiver::prelude::*;
use quiver::wire::DEFAULT_MAX_FRAME_BYTES;
use quiver::Executor;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

mod errors;
mod lifecycle;

/// A server running on its own task
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<std::result::Result<(), quiver::server::ServerError>>,
}

impl TestServer {
    /// Serve an in-memory database
    pub async fn start() -> TestServer {
        Self::start_with(Database::ephemeral(), DEFAULT_MAX_FRAME_BYTES).await
    }

    /// Serve `db` with the given frame limit
    pub async fn start_with(db: Database, max_frame_bytes: usize) -> TestServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server = Server::new(listener, Executor::new(Arc::new(db)), max_frame_bytes);
        Self::spawn(server)
    }

    /// Serve from a full configuration
    pub async fn start_config(config: &ServerConfig) -> TestServer {
        let server = Server::bind(config).await.unwrap();
        Self::spawn(server)
    }

    fn spawn(server: Server) -> TestServer {
        let addr = server.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(server.serve_with_shutdown(async {
            let _ = rx.await;
        }));
        TestServer {
            addr,
            shutdown: Some(tx),
            handle,
        }
    }

    /// Client configuration pointing at this server
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new()
            .host(self.addr.ip().to_string())
            .port(self.addr.port())
            .timeout(std::time::Duration::from_secs(10))
    }

    /// Open a session
    pub async fn connect(&self) -> Session {
        Session::connect(self.client_config()).await.unwrap()
    }

    /// Stop accepting and wait for the serve loop to return
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.unwrap().unwrap();
    }
}
