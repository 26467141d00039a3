//! Provider selection: model loader and vector store

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use themis_providers::constants::{QDRANT_SCROLL_PAGE_SIZE_DEFAULT, QDRANT_TIMEOUT_SECS_DEFAULT};

use crate::constants::{
    DEFAULT_COLLECTION, DEFAULT_EMBEDDING_MODEL, DEFAULT_EMBEDDING_PROVIDER, DEFAULT_QDRANT_URL,
    DEFAULT_VECTOR_STORE_PROVIDER,
};

/// Embedding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Registered loader name (`fastembed`, `null`)
    pub provider: String,

    /// Model used for both indexing and queries
    pub model: String,

    /// Where model files are stored
    pub cache_dir: Option<PathBuf>,

    /// Print model download progress
    pub show_download_progress: bool,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            cache_dir: None,
            show_download_progress: false,
        }
    }
}

/// Vector store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreConfig {
    /// Registered store name (`qdrant`, `memory`)
    pub provider: String,

    /// Qdrant REST endpoint; also the preload source for `memory`
    pub url: String,

    /// Qdrant API key
    pub api_key: Option<String>,

    /// Collection holding the chunk vectors
    pub collection: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Points per scroll page
    pub scroll_page_size: usize,

    /// With `memory`, copy the Qdrant collection at startup
    pub preload: bool,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_VECTOR_STORE_PROVIDER.to_string(),
            url: DEFAULT_QDRANT_URL.to_string(),
            api_key: None,
            collection: DEFAULT_COLLECTION.to_string(),
            timeout_secs: QDRANT_TIMEOUT_SECS_DEFAULT,
            scroll_page_size: QDRANT_SCROLL_PAGE_SIZE_DEFAULT,
            preload: false,
        }
    }
}
