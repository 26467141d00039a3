//! Provider Registry System
//!
//! Compile-time registration of providers with the `linkme` crate.
//! Provider crates add entries to the distributed slices declared here and
//! the composition root resolves them by the name found in configuration.
//!
//! ```text
//! #[linkme::distributed_slice(PROVIDERS)] static ENTRY  (themis-providers)
//!                         ↓
//! pub static PROVIDERS: [Entry] = [..]                  (this module)
//!                         ↓
//! resolve_*(config) → "provider = qdrant" → factory     (themis-infrastructure)
//! ```

pub mod embedding;
pub mod vector_store;

pub use embedding::{
    EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry, list_embedding_providers,
    resolve_embedding_provider,
};
pub use vector_store::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
    list_vector_store_providers, resolve_vector_store_provider,
};
