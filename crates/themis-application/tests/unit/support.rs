//! Shared fixtures: real test providers (null model, in-memory store)

// Force linkme registration of all providers
extern crate themis_providers;

use std::sync::Arc;

use async_trait::async_trait;
use themis_application::domain_services::{Embedder, ModelCache};
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::DocumentSource;
use themis_domain::value_objects::Document;
use themis_providers::embedding::NullModelLoader;
use themis_providers::vector_store::InMemoryVectorStore;

pub const COLLECTION: &str = "articles_chunked";
pub const MODEL: &str = "null-test";
pub const CODE_DEFENSE: &str = "LEGITEXT000006071307";
pub const CODE_FONCTION_PUBLIQUE: &str = "LEGITEXT000044416551";

/// Documents served from memory
pub struct StaticSource(pub Vec<Document>);

#[async_trait]
impl DocumentSource for StaticSource {
    async fn fetch_all(&self) -> Result<Vec<Document>> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// Source whose API is down
pub struct UnreachableSource;

#[async_trait]
impl DocumentSource for UnreachableSource {
    async fn fetch_all(&self) -> Result<Vec<Document>> {
        Err(Error::source_fetch("connection refused"))
    }

    fn describe(&self) -> String {
        "unreachable".to_string()
    }
}

pub fn embedder() -> Embedder {
    Embedder::new(Arc::new(NullModelLoader::new()), ModelCache::new())
}

pub fn store() -> Arc<InMemoryVectorStore> {
    Arc::new(InMemoryVectorStore::new())
}

/// doc1: one long paragraph (4 chunks), doc2: one sentence, doc3: empty
pub fn sample_documents() -> Vec<Document> {
    vec![
        Document::new("doc1", "abcdefghij".repeat(260))
            .with_partition_key(CODE_DEFENSE)
            .with_title("L4111-1"),
        Document::new(
            "doc2",
            "Les fonctionnaires ont droit à une protection fonctionnelle.",
        )
        .with_partition_key(CODE_FONCTION_PUBLIQUE)
        .with_title("L134-1"),
        Document::new("doc3", "   ").with_partition_key(CODE_DEFENSE),
    ]
}
