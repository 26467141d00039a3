//! Tests for provider resolution by name

use themis_application::ports::registry::{
    EmbeddingProviderConfig, VectorStoreProviderConfig, resolve_embedding_provider,
    resolve_vector_store_provider,
};

#[test]
fn test_unknown_embedding_provider_lists_available() {
    let err = resolve_embedding_provider(&EmbeddingProviderConfig::new("word2vec"))
        .err()
        .unwrap_or_default();
    assert!(err.contains("Unknown embedding provider 'word2vec'"));
    assert!(err.contains("null"));
}

#[test]
fn test_unknown_vector_store_lists_available() {
    let err = resolve_vector_store_provider(&VectorStoreProviderConfig::new("milvus"))
        .err()
        .unwrap_or_default();
    assert!(err.contains("Unknown vector store provider 'milvus'"));
    assert!(err.contains("memory"));
}

#[test]
fn test_resolved_memory_stores_are_independent() {
    let config = VectorStoreProviderConfig::new("memory");
    let first = resolve_vector_store_provider(&config).expect("first");
    let second = resolve_vector_store_provider(&config).expect("second");
    assert!(!std::sync::Arc::ptr_eq(&first, &second));
}
