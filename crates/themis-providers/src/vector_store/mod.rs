//! Vector Store Implementations
//!
//! | Store | Backend | Feature |
//! |-------|---------|---------|
//! | InMemoryVectorStore | Process memory, brute-force cosine | `vectorstore-memory` |
//! | QdrantVectorStore | Qdrant REST API | `vectorstore-qdrant` |

#[cfg(feature = "vectorstore-memory")]
pub mod in_memory;
#[cfg(feature = "vectorstore-qdrant")]
pub mod qdrant;

#[cfg(feature = "vectorstore-memory")]
pub use in_memory::InMemoryVectorStore;
#[cfg(feature = "vectorstore-qdrant")]
pub use qdrant::QdrantVectorStore;
