//! Indexing configuration

use serde::{Deserialize, Serialize};
use themis_domain::constants::{
    CHUNK_OVERLAP_DEFAULT, CHUNK_SIZE_DEFAULT, INDEXING_UPSERT_BATCH_SIZE,
};

/// Chunking and upsert settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexingConfig {
    /// Maximum chunk length in characters
    pub chunk_size: usize,

    /// Characters shared by consecutive windows
    pub chunk_overlap: usize,

    /// Points per acknowledged upsert batch
    pub upsert_batch_size: usize,

    /// Build the collection when the server starts and finds it empty
    pub on_startup: bool,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE_DEFAULT,
            chunk_overlap: CHUNK_OVERLAP_DEFAULT,
            upsert_batch_size: INDEXING_UPSERT_BATCH_SIZE,
            on_startup: true,
        }
    }
}
