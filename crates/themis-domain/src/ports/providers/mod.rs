//! Provider ports
//!
//! Traits implemented by the provider crate and consumed by the use cases.

pub mod clustering;
pub mod document_source;
pub mod embedding;
pub mod vector_store;

pub use clustering::{DensityClusterer, DimensionReducer};
pub use document_source::DocumentSource;
pub use embedding::{EmbeddingModel, ModelLoader};
pub use vector_store::VectorStore;
