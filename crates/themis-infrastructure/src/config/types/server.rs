//! HTTP server configuration

use serde::{Deserialize, Serialize};
use themis_domain::error::{Error, Result};

use crate::constants::{API_KEY_HEADER, DEFAULT_HTTP_PORT, DEFAULT_SERVER_ADDRESS};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub address: String,

    /// Bind port
    pub port: u16,

    /// Shared secret expected in the API key header
    pub api_key: Option<String>,

    /// Name of the header carrying the API key
    pub api_key_header: String,
}

impl ServerConfig {
    /// The configured API key, required before the server may start
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::configuration("server.api_key must be set to serve the HTTP API"))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_SERVER_ADDRESS.to_string(),
            port: DEFAULT_HTTP_PORT,
            api_key: None,
            api_key_header: API_KEY_HEADER.to_string(),
        }
    }
}
