//! Tests for ClusterAggregator over the in-memory store

use std::sync::Arc;

use themis_application::use_cases::ClusterAggregator;
use themis_domain::error::Error;
use themis_domain::ports::providers::VectorStore;
use themis_domain::value_objects::{ChunkPayload, Point};
use themis_providers::vector_store::InMemoryVectorStore;

use crate::support::{CODE_DEFENSE, COLLECTION, store};

fn labelled(original_id: &str, chunk_index: u64, cluster_id: Option<i64>) -> Point {
    Point::new(
        vec![1.0, chunk_index as f32],
        ChunkPayload {
            chunk_text: format!("{original_id} #{chunk_index}"),
            chunk_index,
            title: None,
            original_id: original_id.to_string(),
            code_parent: Some(CODE_DEFENSE.to_string()),
            cluster_id,
        },
    )
}

async fn seeded() -> Arc<InMemoryVectorStore> {
    let store = store();
    store.create_or_replace(COLLECTION, 2).await.expect("create");
    let points = vec![
        labelled("a1", 0, Some(0)),
        labelled("a1", 1, Some(0)),
        labelled("a1", 2, Some(1)),
        labelled("a2", 0, Some(2)),
        labelled("a2", 1, Some(-1)),
        labelled("a3", 0, None),
        labelled("a4", 0, Some(5)),
        labelled("a4", 1, None),
        labelled("a4", 2, Some(5)),
    ];
    store.upsert(COLLECTION, &points, 4).await.expect("upsert");
    store
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_majority_per_document() {
    let aggregator = ClusterAggregator::new(seeded().await, COLLECTION);
    let result = aggregator
        .dominant_clusters(&ids(&["a1", "a4"]))
        .await
        .expect("aggregate");
    assert_eq!(result.len(), 2);
    assert_eq!(result["a1"], 0);
    assert_eq!(result["a4"], 5);
}

#[tokio::test]
async fn test_unlabelled_chunks_count_as_noise() {
    let aggregator = ClusterAggregator::new(seeded().await, COLLECTION);
    let result = aggregator
        .dominant_clusters(&ids(&["a3"]))
        .await
        .expect("aggregate");
    assert_eq!(result["a3"], -1);
}

#[tokio::test]
async fn test_tie_resolved_by_first_label() {
    let aggregator = ClusterAggregator::new(seeded().await, COLLECTION);
    let result = aggregator
        .dominant_clusters(&ids(&["a2"]))
        .await
        .expect("aggregate");
    assert_eq!(result["a2"], 2);
}

#[tokio::test]
async fn test_unknown_documents_are_omitted() {
    let aggregator = ClusterAggregator::new(seeded().await, COLLECTION);
    let result = aggregator
        .dominant_clusters(&ids(&["a1", "missing"]))
        .await
        .expect("aggregate");
    assert_eq!(result.keys().collect::<Vec<_>>(), vec!["a1"]);
}

#[tokio::test]
async fn test_no_chunks_is_not_found() {
    let aggregator = ClusterAggregator::new(seeded().await, COLLECTION);
    let err = aggregator
        .dominant_clusters(&ids(&["missing", "also-missing"]))
        .await
        .err();
    assert!(matches!(err, Some(Error::NotFound { .. })));
}

#[tokio::test]
async fn test_empty_request_is_client_input() {
    let aggregator = ClusterAggregator::new(seeded().await, COLLECTION);
    let err = aggregator.dominant_clusters(&[]).await.err();
    assert!(matches!(err, Some(Error::ClientInput { .. })));
}
