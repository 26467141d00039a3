//! API key authentication
//!
//! Every protected route takes the [`ApiKey`] guard. The expected key and
//! header name come from managed [`ApiKeyConfig`] state; a request whose
//! header is missing or different fails with 403.

use std::sync::Arc;

use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{self, FromRequest, Request};
use themis_domain::error::Result;
use themis_infrastructure::config::ServerConfig;
use tracing::warn;

/// Expected API key and the header carrying it
#[derive(Debug, Clone)]
pub struct ApiKeyConfig {
    /// Header name, matched case-insensitively
    pub header_name: String,
    /// Shared secret
    pub api_key: String,
}

impl ApiKeyConfig {
    /// Create a config
    pub fn new(header_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            header_name: header_name.into(),
            api_key: api_key.into(),
        }
    }

    /// Build from server configuration; the key must be set
    pub fn from_server_config(config: &ServerConfig) -> Result<Self> {
        let key = config.require_api_key()?;
        Ok(Self::new(config.api_key_header.clone(), key))
    }

    /// Whether `provided` is the configured key
    pub fn validate_key(&self, provided: &str) -> bool {
        provided == self.api_key
    }
}

/// Request guard for authenticated routes
pub struct ApiKey;

/// Why a request was rejected
#[derive(Debug)]
pub enum ApiKeyError {
    /// No key configured on the server
    NotConfigured,
    /// Header absent
    Missing,
    /// Header present with another value
    Invalid,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ApiKey {
    type Error = ApiKeyError;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let Some(config) = request.rocket().state::<Arc<ApiKeyConfig>>() else {
            warn!("API key guard used without configuration");
            return Outcome::Error((Status::Forbidden, ApiKeyError::NotConfigured));
        };

        match request.headers().get_one(&config.header_name) {
            Some(key) if config.validate_key(key) => Outcome::Success(ApiKey),
            Some(_) => Outcome::Error((Status::Forbidden, ApiKeyError::Invalid)),
            None => Outcome::Error((Status::Forbidden, ApiKeyError::Missing)),
        }
    }
}
