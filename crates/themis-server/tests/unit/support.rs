//! Rocket client over a small indexed corpus
//!
//! Two codes, three articles, indexed with the null model into the memory
//! store. Cluster labels are written directly so the aggregation routes
//! have something to read.

use std::sync::Arc;

use async_trait::async_trait;
use rocket::local::asynchronous::Client;
use serde_json::Value;
use themis_application::domain_services::{Embedder, ModelCache};
use themis_application::use_cases::{
    ClusterAggregator, IndexBuilder, IndexingSettings, SearchService,
};
use themis_domain::constants::FIELD_CLUSTER_ID;
use themis_domain::error::Result;
use themis_domain::ports::providers::{DocumentSource, VectorStore};
use themis_domain::value_objects::{Document, ScrollQuery};
use themis_providers::embedding::NullModelLoader;
use themis_providers::vector_store::InMemoryVectorStore;
use themis_server::{ApiKeyConfig, ApiState, api_rocket};

pub const API_KEY: &str = "test-secret-key";
pub const COLLECTION: &str = "articles_chunked";
pub const CODE_DEFENSE: &str = "LEGITEXT000006071307";
pub const CODE_FONCTION_PUBLIQUE: &str = "LEGITEXT000044416551";

struct Corpus;

#[async_trait]
impl DocumentSource for Corpus {
    async fn fetch_all(&self) -> Result<Vec<Document>> {
        Ok(vec![
            Document::new("art-defense-1", "Les militaires servent la Nation en tout temps.")
                .with_partition_key(CODE_DEFENSE)
                .with_title("L4111-1"),
            Document::new(
                "art-defense-2",
                "Premier alinéa sur la discipline.\n\nSecond alinéa sur les sanctions.",
            )
            .with_partition_key(CODE_DEFENSE)
            .with_title("L4137-1"),
            Document::new(
                "art-fp-1",
                "Le fonctionnaire bénéficie d'une protection fonctionnelle.",
            )
            .with_partition_key(CODE_FONCTION_PUBLIQUE)
            .with_title("L134-1"),
        ])
    }

    fn describe(&self) -> String {
        "corpus".to_string()
    }
}

/// Label chunks: art-defense-1 → 3, art-defense-2 → [1, 2] tie, art-fp-1 unlabelled
async fn label_chunks(store: &InMemoryVectorStore) {
    let exported = store
        .scroll(COLLECTION, &ScrollQuery::all())
        .await
        .expect("scroll");
    let mut second_article_chunks = 0;
    for point in exported.points {
        let label = match point.payload.original_id.as_str() {
            "art-defense-1" => 3,
            "art-defense-2" => {
                second_article_chunks += 1;
                second_article_chunks
            }
            _ => continue,
        };
        store
            .set_payload_field(COLLECTION, &[point.id], FIELD_CLUSTER_ID, Value::from(label))
            .await
            .expect("label");
    }
}

pub async fn state() -> ApiState {
    let embedder = Embedder::new(Arc::new(NullModelLoader::new()), ModelCache::new());
    let store = Arc::new(InMemoryVectorStore::new());
    IndexBuilder::new(embedder.clone(), store.clone(), IndexingSettings::new("null-test"))
        .rebuild(COLLECTION, &Corpus)
        .await
        .expect("index");
    label_chunks(&store).await;

    ApiState {
        search: Arc::new(SearchService::new(
            embedder,
            store.clone(),
            "null-test",
            COLLECTION,
        )),
        aggregator: Arc::new(ClusterAggregator::new(store.clone(), COLLECTION)),
        vector_store: store,
        collection: COLLECTION.to_string(),
    }
}

pub async fn client() -> Client {
    let auth = Arc::new(ApiKeyConfig::new("x-api-key", API_KEY));
    Client::tracked(api_rocket(state().await, auth))
        .await
        .expect("valid rocket instance")
}
