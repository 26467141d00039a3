//! Configuration types module

pub mod app;
pub mod clustering;
pub mod indexing;
pub mod logging;
pub mod providers;
pub mod server;
pub mod source;

// Re-export main types
pub use app::AppConfig;
pub use clustering::{ClusteringConfig, PartitionConfig};
pub use indexing::IndexingConfig;
pub use logging::LoggingConfig;
pub use providers::{EmbeddingConfig, VectorStoreConfig};
pub use server::ServerConfig;
pub use source::{SourceConfig, SourceKind};
