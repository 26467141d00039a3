//! # Themis - Provider Implementations
//!
//! Concrete implementations of the ports defined in `themis-domain`.
//! Model loaders and vector stores register themselves in the linkme
//! registries declared by `themis-application`, so linking this crate is
//! enough to make them resolvable by name.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Embedding | `ModelLoader` | FastEmbed, Null |
//! | Vector Store | `VectorStore` | Qdrant, InMemory |
//! | Documents | `DocumentSource` | Http, JsonFile |
//! | Reduction | `DimensionReducer` | Umap |
//! | Clustering | `DensityClusterer` | Hdbscan |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! themis-providers = { version = "0.1", default-features = false, features = ["vectorstore-memory"] }
//! ```

// Re-export themis-domain types commonly used with providers
pub use themis_domain::error::{Error, Result};
pub use themis_domain::ports::providers::{
    DensityClusterer, DimensionReducer, DocumentSource, EmbeddingModel, ModelLoader, VectorStore,
};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Model loader implementations
pub mod embedding;

/// Vector store implementations
pub mod vector_store;

/// Document source implementations
pub mod document_source;

/// Reducer and clusterer implementations
pub mod clustering;
