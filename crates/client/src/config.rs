//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default server host
pub const DEFAULT_HOST: &str = "localhost";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default bound on connect and on each request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to connect
///
/// The tenant is sent with every request and shows up in server logs; it
/// does not partition data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server host name or address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Bound on connect and on each request round trip
    pub timeout: Duration,
    /// Tenant label
    pub tenant: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            tenant: None,
        }
    }
}

impl ClientConfig {
    /// Defaults: `localhost:8000`, 30 s, no tenant
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the tenant label
    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    /// `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
