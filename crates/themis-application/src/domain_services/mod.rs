//! Domain services: chunking and embedding orchestration

pub mod chunking;
pub mod embedder;

pub use chunking::{ChunkingOptions, chunk_document, chunk_text};
pub use embedder::{Embedder, ModelCache};
