//! Search Service Use Case
//!
//! Embeds a query and returns the nearest chunks, optionally restricted to
//! one legal code.

use std::sync::Arc;

use themis_domain::constants::{FIELD_CODE_PARENT, SEARCH_MAX_LIMIT};
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::VectorStore;
use themis_domain::value_objects::{PayloadFilter, SearchHit};
use tracing::debug;

use crate::domain_services::Embedder;

/// Read-only semantic search over one collection
pub struct SearchService {
    embedder: Embedder,
    vector_store: Arc<dyn VectorStore>,
    model_name: String,
    collection: String,
}

impl SearchService {
    /// Create a search service over `collection`
    pub fn new(
        embedder: Embedder,
        vector_store: Arc<dyn VectorStore>,
        model_name: impl Into<String>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            embedder,
            vector_store,
            model_name: model_name.into(),
            collection: collection.into(),
        }
    }

    /// Collection this service reads
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Top `limit` chunks for `query`, best first
    ///
    /// `code_parent` restricts matches to chunks of that code. Input is
    /// validated before anything is embedded. Limits above
    /// [`SEARCH_MAX_LIMIT`] are clamped to it.
    pub async fn search(
        &self,
        query: &str,
        limit: i64,
        code_parent: Option<&str>,
    ) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(Error::client_input("Query must not be empty"));
        }
        let limit = usize::try_from(limit)
            .ok()
            .filter(|&l| l > 0)
            .ok_or_else(|| Error::client_input(format!("Limit must be positive, got {limit}")))?;
        if limit > SEARCH_MAX_LIMIT {
            debug!(requested = limit, max = SEARCH_MAX_LIMIT, "Search limit clamped");
        }
        let limit = limit.min(SEARCH_MAX_LIMIT);

        let vector = self
            .embedder
            .embed_one(query, &self.model_name, true)
            .await?;
        let filter = code_parent.map(|code| PayloadFilter::equals(FIELD_CODE_PARENT, code));

        let hits = self
            .vector_store
            .search(&self.collection, &vector, filter.as_ref(), limit)
            .await?;
        debug!(collection = %self.collection, hits = hits.len(), limit, "Search complete");

        Ok(hits.into_iter().map(SearchHit::from).collect())
    }
}
