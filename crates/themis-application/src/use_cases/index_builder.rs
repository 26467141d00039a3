//! Index Builder Use Case
//!
//! Populates a collection from a document source: fetch, chunk, embed once
//! over every chunk, then upsert in acknowledged batches.

use std::sync::Arc;

use themis_domain::constants::INDEXING_UPSERT_BATCH_SIZE;
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::{DocumentSource, VectorStore};
use themis_domain::value_objects::{ChunkPayload, Document, IndexingReport, Point, is_valid_vector};
use tracing::{info, warn};

use crate::domain_services::{ChunkingOptions, Embedder, chunk_document};

/// Settings shared by every build
#[derive(Debug, Clone)]
pub struct IndexingSettings {
    /// Embedding model used for chunk vectors
    pub model_name: String,
    /// Chunk window parameters
    pub chunking: ChunkingOptions,
    /// Points per acknowledged upsert
    pub upsert_batch_size: usize,
}

impl IndexingSettings {
    /// Settings for `model_name` with default chunking and batch size
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            chunking: ChunkingOptions::default(),
            upsert_batch_size: INDEXING_UPSERT_BATCH_SIZE,
        }
    }

    /// Override the chunking parameters
    #[must_use]
    pub fn with_chunking(mut self, chunking: ChunkingOptions) -> Self {
        self.chunking = chunking;
        self
    }

    /// Override the upsert batch size
    #[must_use]
    pub fn with_upsert_batch_size(mut self, size: usize) -> Self {
        self.upsert_batch_size = size;
        self
    }
}

/// Builds and rebuilds vector collections
pub struct IndexBuilder {
    embedder: Embedder,
    vector_store: Arc<dyn VectorStore>,
    settings: IndexingSettings,
}

impl IndexBuilder {
    /// Create a builder writing to `vector_store`
    pub fn new(
        embedder: Embedder,
        vector_store: Arc<dyn VectorStore>,
        settings: IndexingSettings,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            settings,
        }
    }

    /// Drop `collection` and repopulate it from `source`
    ///
    /// The collection is recreated before the source is read, so a fetch
    /// failure leaves it empty. A failed upsert batch aborts the remaining
    /// batches; batches already acknowledged stay written.
    pub async fn rebuild(
        &self,
        collection: &str,
        source: &dyn DocumentSource,
    ) -> Result<IndexingReport> {
        let model_name = self.settings.model_name.as_str();
        let dimension = self.embedder.dimension(model_name).await?;

        info!(collection, dimension, model = model_name, "Recreating collection");
        self.vector_store
            .create_or_replace(collection, dimension)
            .await?;

        info!(collection, source = %source.describe(), "Fetching documents");
        let documents = source.fetch_all().await?;
        let mut report = IndexingReport {
            collection: collection.to_string(),
            documents_fetched: documents.len(),
            ..IndexingReport::default()
        };

        let (texts, payloads) = self.chunk_all(&documents, &mut report);
        if texts.is_empty() {
            warn!(collection, documents = documents.len(), "No chunks to index");
            return Ok(report);
        }

        info!(collection, chunks = texts.len(), "Embedding chunks");
        let vectors = self.embedder.embed_batch(&texts, model_name, false).await?;

        let mut points = Vec::with_capacity(vectors.len());
        for (vector, payload) in vectors.into_iter().zip(payloads) {
            if !is_valid_vector(&vector, dimension) {
                return Err(Error::store_write(format!(
                    "Vector for '{}' chunk {} has {} values, collection '{collection}' expects {dimension}",
                    payload.original_id,
                    payload.chunk_index,
                    vector.len()
                )));
            }
            points.push(Point::new(vector, payload));
        }

        report.points_written = self
            .vector_store
            .upsert(collection, &points, self.settings.upsert_batch_size)
            .await?;

        info!(
            collection,
            documents = report.documents_indexed,
            points = report.points_written,
            "Indexing complete"
        );
        Ok(report)
    }

    /// Build `collection` only when it is missing or empty
    pub async fn ensure_index(
        &self,
        collection: &str,
        source: &dyn DocumentSource,
    ) -> Result<IndexingReport> {
        match self.vector_store.count(collection).await? {
            Some(points) if points > 0 => {
                info!(collection, points, "Collection already populated, skipping build");
                Ok(IndexingReport::skipped(collection))
            }
            _ => self.rebuild(collection, source).await,
        }
    }

    fn chunk_all(
        &self,
        documents: &[Document],
        report: &mut IndexingReport,
    ) -> (Vec<String>, Vec<ChunkPayload>) {
        let mut texts = Vec::new();
        let mut payloads = Vec::new();
        for document in documents.iter().filter(|d| d.has_content()) {
            let chunks = chunk_document(document, &self.settings.chunking);
            if chunks.is_empty() {
                continue;
            }
            report.documents_indexed += 1;
            report.chunks_created += chunks.len();
            for chunk in &chunks {
                payloads.push(ChunkPayload::from(chunk));
            }
            texts.extend(chunks.into_iter().map(|c| c.text));
        }
        (texts, payloads)
    }
}
