//! HTTP Response Utilities
//!
//! Helper functions for processing HTTP responses from remote providers.
//! These are shared utilities, not ports.

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use themis_domain::error::{Error, Result};

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and decode the JSON body
    ///
    /// # Arguments
    /// * `response` - The HTTP response to check
    /// * `context` - What was being done, for error messages
    /// * `make_error` - Builds the domain error for this call site
    pub async fn check_and_parse<T: DeserializeOwned>(
        response: Response,
        context: &str,
        make_error: fn(String) -> Error,
    ) -> Result<T> {
        let response = Self::check_status(response, context, make_error).await?;
        response
            .json()
            .await
            .map_err(|e| make_error(format!("{context}: response parse failed: {e}")))
    }

    /// Check response status, keeping the body unread on success
    pub async fn check_status(
        response: Response,
        context: &str,
        make_error: fn(String) -> Error,
    ) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let code = status.as_u16();

        Err(match code {
            401 | 403 => make_error(format!("{context}: authentication failed: {error_text}")),
            404 => make_error(format!("{context}: not found: {error_text}")),
            429 => make_error(format!("{context}: rate limit exceeded: {error_text}")),
            500..=599 => make_error(format!("{context}: server error ({code}): {error_text}")),
            _ => make_error(format!("{context}: request failed ({code}): {error_text}")),
        })
    }

    /// Whether a failed status is worth another attempt
    pub fn should_retry(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }

    /// Exponential backoff before attempt `attempt` (1-based)
    pub fn retry_backoff(attempt: usize) -> Duration {
        let capped = attempt.min(5) as u32;
        Duration::from_millis(250 * (1 << capped))
    }
}
