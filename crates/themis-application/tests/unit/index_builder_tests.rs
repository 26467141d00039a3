//! Tests for IndexBuilder

use std::sync::Arc;

use themis_application::domain_services::ChunkingOptions;
use themis_application::use_cases::{IndexBuilder, IndexingSettings};
use themis_domain::error::Error;
use themis_domain::ports::providers::VectorStore;
use themis_domain::value_objects::{Document, ScrollQuery};

use crate::support::{
    COLLECTION, MODEL, StaticSource, UnreachableSource, embedder, sample_documents, store,
};

fn builder(store: Arc<dyn VectorStore>) -> IndexBuilder {
    IndexBuilder::new(embedder(), store, IndexingSettings::new(MODEL))
}

#[tokio::test]
async fn test_rebuild_chunks_embeds_and_writes_every_chunk() {
    let store = store();
    let report = builder(store.clone())
        .rebuild(COLLECTION, &StaticSource(sample_documents()))
        .await
        .expect("rebuild");

    assert_eq!(report.documents_fetched, 3);
    assert_eq!(report.documents_indexed, 2);
    assert_eq!(report.chunks_created, 5);
    assert_eq!(report.points_written, 5);
    assert!(!report.skipped);
    assert_eq!(store.count(COLLECTION).await.expect("count"), Some(5));

    let exported = store
        .scroll(COLLECTION, &ScrollQuery::all())
        .await
        .expect("scroll");
    let mut doc1_indices: Vec<u64> = exported
        .points
        .iter()
        .filter(|p| p.payload.original_id == "doc1")
        .map(|p| p.payload.chunk_index)
        .collect();
    doc1_indices.sort_unstable();
    assert_eq!(doc1_indices, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_rebuild_is_destructive() {
    let store = store();
    let builder = builder(store.clone());
    builder
        .rebuild(COLLECTION, &StaticSource(sample_documents()))
        .await
        .expect("first build");
    builder
        .rebuild(
            COLLECTION,
            &StaticSource(vec![Document::new("only", "Un seul article.")]),
        )
        .await
        .expect("second build");
    assert_eq!(store.count(COLLECTION).await.expect("count"), Some(1));
}

#[tokio::test]
async fn test_ensure_index_skips_populated_collection() {
    let store = store();
    let builder = builder(store.clone());
    let first = builder
        .ensure_index(COLLECTION, &StaticSource(sample_documents()))
        .await
        .expect("build");
    assert!(!first.skipped);

    let second = builder
        .ensure_index(COLLECTION, &UnreachableSource)
        .await
        .expect("skip");
    assert!(second.skipped);
    assert_eq!(store.count(COLLECTION).await.expect("count"), Some(5));
}

#[tokio::test]
async fn test_source_failure_leaves_empty_collection() {
    let store = store();
    let err = builder(store.clone())
        .rebuild(COLLECTION, &UnreachableSource)
        .await
        .err();
    assert!(matches!(err, Some(Error::SourceFetch { .. })));
    assert_eq!(store.count(COLLECTION).await.expect("count"), Some(0));
}

#[tokio::test]
async fn test_no_content_is_not_an_error() {
    let store = store();
    let report = builder(store.clone())
        .rebuild(COLLECTION, &StaticSource(vec![Document::new("empty", "\n\n")]))
        .await
        .expect("rebuild");
    assert_eq!(report.chunks_created, 0);
    assert_eq!(report.points_written, 0);
}

#[tokio::test]
async fn test_custom_chunking_and_batch_size() {
    let store = store();
    let settings = IndexingSettings::new(MODEL)
        .with_chunking(ChunkingOptions::new(500, 100).expect("options"))
        .with_upsert_batch_size(2);
    let report = IndexBuilder::new(embedder(), store.clone(), settings)
        .rebuild(COLLECTION, &StaticSource(sample_documents()))
        .await
        .expect("rebuild");
    // 2600 chars in windows of 500 advancing by 400: 7 chunks, plus doc2
    assert_eq!(report.chunks_created, 8);
    assert_eq!(store.count(COLLECTION).await.expect("count"), Some(8));
}
