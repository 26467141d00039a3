//! # Themis
//!
//! Semantic search and topic clustering over French legal articles.
//!
//! Articles are split into overlapping chunks, embedded with a
//! sentence-embedding model and stored in a vector collection together
//! with their article id, number and parent code. The collection serves
//! filtered similarity search, and an offline job clusters each code's
//! chunks (UMAP then HDBSCAN) and writes a `cluster_id` back on every
//! point. The dominant cluster of an article is the majority label of its
//! chunks.
//!
//! ## Architecture
//!
//! - `domain` - Errors, value objects and port traits
//! - `application` - Chunking, embedding and the four use cases
//! - `infrastructure` - Configuration, logging and the composition root
//! - `server` - HTTP API
//! - [`cli`] - The `themis` command line

pub mod cli;

/// Domain layer - core types and port traits
pub mod domain {
    pub use themis_domain::*;
}

/// Application layer - use cases
pub mod application {
    pub use themis_application::*;
}

/// Infrastructure layer - configuration, logging and composition root
pub mod infrastructure {
    pub use themis_infrastructure::*;
}

/// Server layer - HTTP API
pub mod server {
    pub use themis_server::*;
}

pub use domain::{Error, Result};
pub use infrastructure::{AppConfig, AppContext, ConfigLoader, init_app};
pub use server::run_server;
