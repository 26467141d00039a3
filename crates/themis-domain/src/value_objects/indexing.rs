//! Indexing outcome value objects

use serde::{Deserialize, Serialize};

/// Summary of an index build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingReport {
    /// Collection that was (re)built
    pub collection: String,
    /// Documents returned by the source
    pub documents_fetched: usize,
    /// Documents that produced at least one chunk
    pub documents_indexed: usize,
    /// Chunks produced across all documents
    pub chunks_created: usize,
    /// Points acknowledged by the store
    pub points_written: usize,
    /// True when an existing, populated collection was reused
    pub skipped: bool,
}

impl IndexingReport {
    /// Report for a populated collection that was left untouched
    pub fn skipped(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            skipped: true,
            ..Self::default()
        }
    }
}
