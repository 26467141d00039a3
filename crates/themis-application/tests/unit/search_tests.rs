//! Tests for SearchService
//!
//! Runs against a collection built by IndexBuilder with the null model.

use themis_application::use_cases::{IndexBuilder, IndexingSettings, SearchService};
use themis_domain::constants::SEARCH_MAX_LIMIT;
use themis_domain::error::Error;
use themis_domain::value_objects::Document;

use crate::support::{
    CODE_DEFENSE, CODE_FONCTION_PUBLIQUE, COLLECTION, MODEL, StaticSource, embedder,
    sample_documents, store,
};

async fn indexed_service() -> SearchService {
    let store = store();
    IndexBuilder::new(embedder(), store.clone(), IndexingSettings::new(MODEL))
        .rebuild(COLLECTION, &StaticSource(sample_documents()))
        .await
        .expect("rebuild");
    SearchService::new(embedder(), store, MODEL, COLLECTION)
}

#[tokio::test]
async fn test_search_finds_matching_document() {
    let service = indexed_service().await;
    let hits = service
        .search(
            "Les fonctionnaires ont droit à une protection fonctionnelle.",
            1,
            None,
        )
        .await
        .expect("search");

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document_id, "doc2");
    assert_eq!(hits[0].title.as_deref(), Some("L134-1"));
    assert_eq!(
        hits[0].matched_partition.as_deref(),
        Some(CODE_FONCTION_PUBLIQUE)
    );
    assert!(hits[0].highlight.contains("protection fonctionnelle"));
}

#[tokio::test]
async fn test_results_sorted_and_bounded() {
    let service = indexed_service().await;
    let hits = service
        .search("protection des fonctionnaires", 3, None)
        .await
        .expect("search");
    assert!(hits.len() <= 3);
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn test_filter_restricts_partition() {
    let service = indexed_service().await;
    let hits = service
        .search("protection fonctionnelle", 10, Some(CODE_DEFENSE))
        .await
        .expect("search");
    assert_eq!(hits.len(), 4);
    assert!(
        hits.iter()
            .all(|h| h.matched_partition.as_deref() == Some(CODE_DEFENSE))
    );
}

#[tokio::test]
async fn test_invalid_input_rejected() {
    let service = indexed_service().await;
    for (query, limit) in [("", 10), ("   ", 10), ("droit", 0), ("droit", -3)] {
        let err = service.search(query, limit, None).await.err();
        assert!(
            matches!(err, Some(Error::ClientInput { .. })),
            "query {query:?} limit {limit}"
        );
    }
}

#[tokio::test]
async fn test_unknown_partition_returns_nothing() {
    let service = indexed_service().await;
    let hits = service
        .search("droit", 5, Some("LEGITEXT999"))
        .await
        .expect("search");
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_limit_beyond_collection_returns_every_chunk() {
    let service = indexed_service().await;
    for limit in [50, 1 << 40, i64::MAX] {
        let hits = service
            .search("protection fonctionnelle", limit, None)
            .await
            .expect("search");
        assert_eq!(hits.len(), 5, "limit {limit}");
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[tokio::test]
async fn test_limit_clamped_to_maximum() {
    let store = store();
    let documents: Vec<Document> = (0..SEARCH_MAX_LIMIT + 5)
        .map(|i| Document::new(format!("art-{i}"), format!("Article numéro {i}.")))
        .collect();
    IndexBuilder::new(embedder(), store.clone(), IndexingSettings::new(MODEL))
        .rebuild(COLLECTION, &StaticSource(documents))
        .await
        .expect("rebuild");
    let service = SearchService::new(embedder(), store, MODEL, COLLECTION);

    let hits = service
        .search("article", i64::MAX, None)
        .await
        .expect("search");
    assert_eq!(hits.len(), SEARCH_MAX_LIMIT);
}
