//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{
    ClusteringConfig, EmbeddingConfig, IndexingConfig, LoggingConfig, ServerConfig, SourceConfig,
    VectorStoreConfig,
};

/// Root configuration, one field per TOML section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP API
    pub server: ServerConfig,
    /// Log output
    pub logging: LoggingConfig,
    /// Model loader and model name
    pub embedding: EmbeddingConfig,
    /// Vector store strategy and collection
    pub vector_store: VectorStoreConfig,
    /// Where documents are read from
    pub source: SourceConfig,
    /// Chunking and upsert settings
    pub indexing: IndexingConfig,
    /// Offline clustering job
    pub clustering: ClusteringConfig,
}
