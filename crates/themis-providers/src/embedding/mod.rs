//! Model Loader Implementations
//!
//! | Loader | Type | Feature |
//! |--------|------|---------|
//! | FastEmbedModelLoader | Local ONNX | `embedding-fastembed` |
//! | NullModelLoader | Testing / offline | always |

#[cfg(feature = "embedding-fastembed")]
pub mod fastembed;
pub mod null;

#[cfg(feature = "embedding-fastembed")]
pub use fastembed::{FastEmbedModel, FastEmbedModelLoader, parse_embedding_model};
pub use null::{NullEmbeddingModel, NullModelLoader};
