//! Server configuration.
//!
//! Built once at startup (CLI flags, environment, `.env`) and handed to
//! [`crate::api::start_server`], which passes it by reference to
//! [`crate::api::create_app`]. The router copies out the CORS origin and body
//! limit while it is built; handlers never see the config.

use std::net::SocketAddr;

use crate::error::ServerResult;

/// Default listen port (the form's historical development port).
pub const DEFAULT_PORT: u16 = 5000;

/// Default request body limit: 1 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Immutable settings for the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
    /// CORS origin to allow; `None` allows any origin.
    pub allowed_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            allowed_origin: None,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind.
    pub fn socket_addr(&self) -> ServerResult<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse::<SocketAddr>()?)
    }
}
