//! HTTP document source
//!
//! Fetches every article with a single authenticated GET.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::DocumentSource;
use themis_domain::value_objects::Document;
use tracing::info;

use super::records::parse_documents;
use crate::constants::SOURCE_API_KEY_HEADER;
use crate::utils::HttpResponseUtils;

/// Article API client
pub struct HttpDocumentSource {
    client: Client,
    url: String,
}

impl HttpDocumentSource {
    /// Create a source reading `url`, sending `api_key` as `x-api-key`
    pub fn new(url: impl Into<String>, api_key: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| Error::configuration_with_source("Invalid source API key", e))?;
            headers.insert(SOURCE_API_KEY_HEADER, value);
        }
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::configuration_with_source("Failed to build source HTTP client", e))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

fn fetch_error(message: String) -> Error {
    Error::source_fetch(message)
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch_all(&self) -> Result<Vec<Document>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::source_fetch_with_source(format!("GET {} failed", self.url), e))?;
        let body: Value =
            HttpResponseUtils::check_and_parse(response, "Article source", fetch_error).await?;
        let documents = parse_documents(&body)?;
        info!(url = %self.url, documents = documents.len(), "Fetched articles");
        Ok(documents)
    }

    fn describe(&self) -> String {
        format!("http {}", self.url)
    }
}
