//! Application ports
//!
//! Provider traits live in `themis-domain`; this module re-exports them next
//! to the registries that resolve their implementations.

pub mod registry;

pub use themis_domain::ports::providers;
pub use themis_domain::ports::providers::{
    DensityClusterer, DimensionReducer, DocumentSource, EmbeddingModel, ModelLoader, VectorStore,
};
