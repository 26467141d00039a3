use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::Document;

/// Source of the documents to index
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch every document
    ///
    /// Any failure (network, timeout, non-success status, undecodable body)
    /// is reported as a single `SourceFetch` error; partial lists are never
    /// returned.
    async fn fetch_all(&self) -> Result<Vec<Document>>;

    /// Short description used in logs
    fn describe(&self) -> String;
}
