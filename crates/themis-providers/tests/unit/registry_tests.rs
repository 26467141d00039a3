//! Tests for linkme provider registration

use themis_application::ports::registry::{
    EmbeddingProviderConfig, VectorStoreProviderConfig, list_embedding_providers,
    list_vector_store_providers, resolve_embedding_provider, resolve_vector_store_provider,
};

#[test]
fn test_providers_are_registered() {
    let embedding: Vec<&str> = list_embedding_providers().iter().map(|(n, _)| *n).collect();
    assert!(embedding.contains(&"null"));
    assert!(embedding.contains(&"fastembed"));

    let stores: Vec<&str> = list_vector_store_providers()
        .iter()
        .map(|(n, _)| *n)
        .collect();
    assert!(stores.contains(&"memory"));
    assert!(stores.contains(&"qdrant"));
}

#[test]
fn test_resolve_by_name() {
    let loader = resolve_embedding_provider(&EmbeddingProviderConfig::new("null"))
        .expect("null loader");
    assert_eq!(loader.provider_name(), "null");

    let store = resolve_vector_store_provider(&VectorStoreProviderConfig::new("memory"))
        .expect("memory store");
    assert_eq!(store.provider_name(), "memory");
}

#[test]
fn test_qdrant_requires_url() {
    let err = resolve_vector_store_provider(&VectorStoreProviderConfig::new("qdrant"))
        .err()
        .unwrap_or_default();
    assert!(err.contains("requires a url"));

    let store = resolve_vector_store_provider(
        &VectorStoreProviderConfig::new("qdrant").with_url("http://localhost:6333"),
    )
    .expect("qdrant store");
    assert_eq!(store.provider_name(), "qdrant");
}
