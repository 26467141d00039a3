//! Application context
//!
//! [`init_app`] resolves the ports named in configuration and builds the
//! four use cases over them. Everything is created once and shared: the
//! model cache in particular lives as long as the context.

use std::sync::Arc;

use themis_application::domain_services::{ChunkingOptions, Embedder, ModelCache};
use themis_application::use_cases::{
    ClusterAggregator, ClusteringPipeline, IndexBuilder, IndexingSettings, SearchService,
};
use themis_domain::error::Result;
use themis_domain::ports::providers::{DocumentSource, VectorStore};
use themis_domain::value_objects::{ClusteringReport, IndexingReport};
use themis_providers::clustering::{HdbscanClusterer, UmapReducer};
use themis_providers::vector_store::InMemoryVectorStore;
use tracing::info;

use super::provider_resolvers::{resolve_document_source, resolve_model_loader, resolve_vector_store};
use crate::config::AppConfig;

const MEMORY_PROVIDER: &str = "memory";
const PRELOAD_PROVIDER: &str = "qdrant";

/// Shared services built from one configuration
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    vector_store: Arc<dyn VectorStore>,
    index_builder: Arc<IndexBuilder>,
    search: Arc<SearchService>,
    clustering: Arc<ClusteringPipeline>,
    aggregator: Arc<ClusterAggregator>,
}

impl AppContext {
    /// Collection every service works on
    pub fn collection(&self) -> &str {
        &self.config.vector_store.collection
    }

    /// Selected vector store
    pub fn vector_store(&self) -> Arc<dyn VectorStore> {
        Arc::clone(&self.vector_store)
    }

    /// Index build use case
    pub fn index_builder(&self) -> Arc<IndexBuilder> {
        Arc::clone(&self.index_builder)
    }

    /// Query use case
    pub fn search_service(&self) -> Arc<SearchService> {
        Arc::clone(&self.search)
    }

    /// Offline clustering use case
    pub fn clustering_pipeline(&self) -> Arc<ClusteringPipeline> {
        Arc::clone(&self.clustering)
    }

    /// Document-to-cluster use case
    pub fn cluster_aggregator(&self) -> Arc<ClusterAggregator> {
        Arc::clone(&self.aggregator)
    }

    /// Build the configured document source
    pub fn document_source(&self) -> Result<Arc<dyn DocumentSource>> {
        resolve_document_source(&self.config.source)
    }

    /// Build the collection from the document source when it is empty
    pub async fn ensure_index(&self) -> Result<IndexingReport> {
        let source = self.document_source()?;
        self.index_builder
            .ensure_index(self.collection(), source.as_ref())
            .await
    }

    /// Drop and rebuild the collection from the document source
    pub async fn rebuild_index(&self) -> Result<IndexingReport> {
        let source = self.document_source()?;
        self.index_builder
            .rebuild(self.collection(), source.as_ref())
            .await
    }

    /// Cluster every configured partition
    pub async fn cluster_configured_partitions(&self) -> Vec<ClusteringReport> {
        self.clustering
            .cluster_all(&self.config.clustering.jobs())
            .await
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("collection", &self.collection())
            .field("vector_store", &self.vector_store.provider_name())
            .field("model", &self.config.embedding.model)
            .finish_non_exhaustive()
    }
}

/// Initialize the application context
///
/// Providers register themselves through linkme when `themis-providers` is
/// linked; no explicit registration call is needed.
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    let config = Arc::new(config);

    let loader = resolve_model_loader(&config.embedding)?;
    let vector_store = open_vector_store(&config).await?;
    info!(
        embedding = loader.provider_name(),
        model = %config.embedding.model,
        vector_store = vector_store.provider_name(),
        collection = %config.vector_store.collection,
        "Resolved providers"
    );

    let embedder = Embedder::new(loader, ModelCache::new());
    let chunking = ChunkingOptions::new(config.indexing.chunk_size, config.indexing.chunk_overlap)?;
    let settings = IndexingSettings::new(config.embedding.model.clone())
        .with_chunking(chunking)
        .with_upsert_batch_size(config.indexing.upsert_batch_size);
    let collection = config.vector_store.collection.clone();

    let index_builder = Arc::new(IndexBuilder::new(
        embedder.clone(),
        Arc::clone(&vector_store),
        settings,
    ));
    let search = Arc::new(SearchService::new(
        embedder,
        Arc::clone(&vector_store),
        config.embedding.model.clone(),
        collection.clone(),
    ));
    let clustering = Arc::new(
        ClusteringPipeline::new(
            Arc::clone(&vector_store),
            Arc::new(UmapReducer::new()),
            Arc::new(HdbscanClusterer::new()),
            collection.clone(),
        )
        .with_update_batch_size(config.clustering.update_batch_size),
    );
    let aggregator = Arc::new(ClusterAggregator::new(Arc::clone(&vector_store), collection));

    Ok(AppContext {
        config,
        vector_store,
        index_builder,
        search,
        clustering,
        aggregator,
    })
}

/// Resolve the store; a preloading memory store is filled from Qdrant first
async fn open_vector_store(config: &AppConfig) -> Result<Arc<dyn VectorStore>> {
    let store_config = &config.vector_store;
    if store_config.provider != MEMORY_PROVIDER || !store_config.preload {
        return resolve_vector_store(store_config, &store_config.provider);
    }

    let upstream = resolve_vector_store(store_config, PRELOAD_PROVIDER)?;
    let memory = InMemoryVectorStore::new();
    let points = memory
        .refresh_from(upstream.as_ref(), &store_config.collection)
        .await?;
    info!(
        collection = %store_config.collection,
        points,
        url = %store_config.url,
        "Memory store preloaded"
    );
    Ok(Arc::new(memory))
}
