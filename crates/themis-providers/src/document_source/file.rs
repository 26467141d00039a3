//! JSON file document source
//!
//! Replays a recorded article dump, e.g. for CI or offline builds.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::DocumentSource;
use themis_domain::value_objects::Document;
use tracing::info;

use super::records::parse_documents;

/// Reads articles from a JSON file holding an array of records
pub struct JsonFileDocumentSource {
    path: PathBuf,
}

impl JsonFileDocumentSource {
    /// Create a source over `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentSource for JsonFileDocumentSource {
    async fn fetch_all(&self) -> Result<Vec<Document>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::source_fetch_with_source(format!("Cannot read {}", self.path.display()), e)
        })?;
        let body: Value = serde_json::from_str(&raw).map_err(|e| {
            Error::source_fetch_with_source(format!("Cannot decode {}", self.path.display()), e)
        })?;
        let documents = parse_documents(&body)?;
        info!(path = %self.path.display(), documents = documents.len(), "Loaded articles");
        Ok(documents)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
