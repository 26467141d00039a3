use crate::error::{Error, Result};
use crate::value_objects::{PayloadFilter, Point, ScoredPoint, ScrollQuery, ScrollResult};
use async_trait::async_trait;
use serde_json::Value;

/// Vector index holding chunk points
///
/// Two strategies implement this port: a remote ANN service queried per
/// request, and an in-process cache scored by brute force. Orchestration code
/// depends only on this trait.
///
/// # Example
///
/// ```ignore
/// use themis_domain::ports::providers::VectorStore;
///
/// store.create_or_replace("articles_chunked", 1024).await?;
/// store.upsert("articles_chunked", points, 256).await?;
/// let hits = store.search("articles_chunked", &query, None, 10).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Drop `collection` if it exists and create it empty
    ///
    /// Destructive: used only by full rebuilds, never for incremental writes.
    ///
    /// # Arguments
    /// * `collection` - Collection name
    /// * `dimension` - Vector length every point must have; cosine distance
    async fn create_or_replace(&self, collection: &str, dimension: usize) -> Result<()>;

    /// Write one batch and wait until the store acknowledges it
    ///
    /// # Arguments
    /// * `collection` - Target collection
    /// * `points` - Points whose vectors match the collection dimension
    async fn upsert_batch(&self, collection: &str, points: &[Point]) -> Result<()>;

    /// Export every point matching `query`, following the cursor to the end
    ///
    /// Points with invalid vectors or payloads are dropped and counted in
    /// the returned [`ScrollResult`].
    async fn scroll(&self, collection: &str, query: &ScrollQuery) -> Result<ScrollResult>;

    /// Nearest neighbours of `query_vector` by cosine similarity
    ///
    /// # Arguments
    /// * `collection` - Collection to search
    /// * `query_vector` - Query embedding
    /// * `filter` - Optional payload predicate
    /// * `limit` - Maximum number of hits
    ///
    /// # Returns
    /// Hits in descending score order, raw cosine similarity in `[-1, 1]`
    async fn search(
        &self,
        collection: &str,
        query_vector: &[f32],
        filter: Option<&PayloadFilter>,
        limit: usize,
    ) -> Result<Vec<ScoredPoint>>;

    /// Set `field` to `value` on every listed point, leaving vectors and
    /// all other payload fields untouched
    async fn set_payload_field(
        &self,
        collection: &str,
        point_ids: &[String],
        field: &str,
        value: Value,
    ) -> Result<()>;

    /// Number of points, or `None` when the collection does not exist
    async fn count(&self, collection: &str) -> Result<Option<u64>>;

    /// Get the name/identifier of this vector store provider
    fn provider_name(&self) -> &str;

    /// Write `points` in sequential batches of `batch_size`
    ///
    /// Each batch is acknowledged before the next one is sent, so an
    /// interrupted run leaves a prefix of whole batches in the store.
    ///
    /// # Returns
    /// Number of points written
    async fn upsert(&self, collection: &str, points: &[Point], batch_size: usize) -> Result<usize> {
        if batch_size == 0 {
            return Err(Error::configuration("Upsert batch size must be positive"));
        }
        let mut written = 0;
        for batch in points.chunks(batch_size) {
            self.upsert_batch(collection, batch).await?;
            written += batch.len();
        }
        Ok(written)
    }

    /// Non-destructive update of a single point's field
    async fn update_payload_field(
        &self,
        collection: &str,
        point_id: &str,
        field: &str,
        value: Value,
    ) -> Result<()> {
        self.set_payload_field(collection, &[point_id.to_string()], field, value)
            .await
    }
}
