//! In-memory vector store provider implementation
//!
//! Keeps every collection fully in process memory and scores search
//! queries by brute-force cosine similarity. Data is not persisted; it can
//! be loaded at startup from another store with [`InMemoryVectorStore::refresh_from`].

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::VectorStore;
use themis_domain::value_objects::{
    ChunkPayload, PayloadFilter, Point, ScoredPoint, ScrollQuery, ScrollResult, Vector,
    is_valid_vector,
};
use tracing::{info, warn};

/// A stored point with its raw payload
struct StoredPoint {
    id: String,
    vector: Vector,
    payload: Map<String, Value>,
}

/// One collection: fixed dimension, points in insertion order
struct Collection {
    dimension: usize,
    points: Vec<StoredPoint>,
    positions: HashMap<String, usize>,
}

impl Collection {
    fn new(dimension: usize) -> Self {
        Self {
            dimension,
            points: Vec::new(),
            positions: HashMap::new(),
        }
    }

    fn upsert(&mut self, point: StoredPoint) {
        if let Some(&position) = self.positions.get(&point.id) {
            self.points[position] = point;
        } else {
            self.positions.insert(point.id.clone(), self.points.len());
            self.points.push(point);
        }
    }
}

/// In-memory vector store provider
pub struct InMemoryVectorStore {
    collections: Arc<DashMap<String, Collection>>,
}

impl InMemoryVectorStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            collections: Arc::new(DashMap::new()),
        }
    }

    /// Replace `collection` with a full copy read from `source`
    ///
    /// Returns the number of points loaded. Points the source reports as
    /// invalid are not copied.
    pub async fn refresh_from(&self, source: &dyn VectorStore, collection: &str) -> Result<usize> {
        let exported = source
            .scroll(collection, &ScrollQuery::all().with_vectors())
            .await?;
        if exported.invalid_vectors + exported.invalid_payloads > 0 {
            warn!(
                collection,
                invalid_vectors = exported.invalid_vectors,
                invalid_payloads = exported.invalid_payloads,
                "Skipped invalid points while preloading"
            );
        }
        let Some(dimension) = exported.points.first().map(|p| p.vector.len()) else {
            warn!(collection, source = source.provider_name(), "Nothing to preload");
            return Ok(0);
        };

        let mut loaded = Collection::new(dimension);
        for point in exported.points {
            loaded.upsert(StoredPoint {
                id: point.id,
                vector: point.vector,
                payload: point.payload.to_json(),
            });
        }
        let count = loaded.points.len();
        self.collections.insert(collection.to_string(), loaded);
        info!(collection, points = count, source = source.provider_name(), "Preloaded collection");
        Ok(count)
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn project(payload: &Map<String, Value>, fields: Option<&[String]>) -> Map<String, Value> {
    match fields {
        Some(fields) => fields
            .iter()
            .filter_map(|f| payload.get(f).map(|v| (f.clone(), v.clone())))
            .collect(),
        None => payload.clone(),
    }
}

fn passes(filter: Option<&PayloadFilter>, payload: &Map<String, Value>) -> bool {
    filter.is_none_or(|f| f.matches(payload))
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn create_or_replace(&self, collection: &str, dimension: usize) -> Result<()> {
        if dimension == 0 {
            return Err(Error::store_write("Vector dimension must be positive"));
        }
        self.collections
            .insert(collection.to_string(), Collection::new(dimension));
        Ok(())
    }

    async fn upsert_batch(&self, collection: &str, points: &[Point]) -> Result<()> {
        let mut coll = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| Error::store_write(format!("Collection '{collection}' not found")))?;

        if let Some(bad) = points
            .iter()
            .find(|p| !is_valid_vector(&p.vector, coll.dimension))
        {
            return Err(Error::store_write(format!(
                "Point '{}' has {} values, collection '{collection}' expects {}",
                bad.id,
                bad.vector.len(),
                coll.dimension
            )));
        }

        for point in points {
            coll.upsert(StoredPoint {
                id: point.id.clone(),
                vector: point.vector.clone(),
                payload: point.payload.to_json(),
            });
        }
        Ok(())
    }

    async fn scroll(&self, collection: &str, query: &ScrollQuery) -> Result<ScrollResult> {
        let coll = self
            .collections
            .get(collection)
            .ok_or_else(|| Error::store_read(format!("Collection '{collection}' not found")))?;

        let mut result = ScrollResult::default();
        for stored in coll
            .points
            .iter()
            .filter(|p| passes(query.filter.as_ref(), &p.payload))
        {
            let vector = if query.with_vectors {
                if !is_valid_vector(&stored.vector, coll.dimension) {
                    result.invalid_vectors += 1;
                    continue;
                }
                stored.vector.clone()
            } else {
                Vec::new()
            };
            let projected = project(&stored.payload, query.payload_fields.as_deref());
            let Some(payload) = ChunkPayload::from_json(&projected) else {
                result.invalid_payloads += 1;
                continue;
            };
            result.points.push(Point {
                id: stored.id.clone(),
                vector,
                payload,
            });
        }
        Ok(result)
    }

    async fn search(
        &self,
        collection: &str,
        query_vector: &[f32],
        filter: Option<&PayloadFilter>,
        limit: usize,
    ) -> Result<Vec<ScoredPoint>> {
        let coll = self
            .collections
            .get(collection)
            .ok_or_else(|| Error::store_read(format!("Collection '{collection}' not found")))?;
        if query_vector.len() != coll.dimension {
            return Err(Error::store_read(format!(
                "Query has {} values, collection '{collection}' expects {}",
                query_vector.len(),
                coll.dimension
            )));
        }
        if limit == 0 {
            return Ok(Vec::new());
        }

        // Precompute query norm once
        let query_norm = compute_norm(query_vector);

        // Min-heap for top-k selection: O(n log k) instead of O(n log n)
        let mut heap: BinaryHeap<ScoredItem> =
            BinaryHeap::with_capacity(limit.min(coll.points.len()) + 1);
        let mut invalid_payloads = 0usize;
        for (index, stored) in coll.points.iter().enumerate() {
            if !passes(filter, &stored.payload) {
                continue;
            }
            let Some(payload) = ChunkPayload::from_json(&stored.payload) else {
                invalid_payloads += 1;
                continue;
            };
            let item = ScoredItem {
                score: cosine_similarity_with_norm(query_vector, &stored.vector, query_norm),
                index,
                payload,
            };
            if heap.len() < limit {
                heap.push(item);
            } else if heap.peek().is_some_and(|worst| item < *worst) {
                heap.pop();
                heap.push(item);
            }
        }
        if invalid_payloads > 0 {
            warn!(collection, invalid_payloads, "Skipped points with invalid payloads");
        }

        let mut items = heap.into_vec();
        items.sort();

        Ok(items
            .into_iter()
            .map(|item| ScoredPoint {
                id: coll.points[item.index].id.clone(),
                score: item.score,
                payload: item.payload,
            })
            .collect())
    }

    async fn set_payload_field(
        &self,
        collection: &str,
        point_ids: &[String],
        field: &str,
        value: Value,
    ) -> Result<()> {
        let mut coll = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| Error::store_write(format!("Collection '{collection}' not found")))?;

        for id in point_ids {
            let Some(&position) = coll.positions.get(id) else {
                continue;
            };
            coll.points[position]
                .payload
                .insert(field.to_string(), value.clone());
        }
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<Option<u64>> {
        Ok(self
            .collections
            .get(collection)
            .map(|coll| coll.points.len() as u64))
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

/// Scored item for heap-based top-k selection
///
/// Ordered best first: higher score, then earlier insertion. The heap's
/// top is therefore the worst retained item.
struct ScoredItem {
    score: f32,
    index: usize,
    payload: ChunkPayload,
}

impl PartialEq for ScoredItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the L2 norm of a vector
fn compute_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Raw cosine similarity in `[-1, 1]` with precomputed query norm
fn cosine_similarity_with_norm(a: &[f32], b: &[f32], norm_a: f32) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_b = compute_norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use themis_application::ports::registry::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
};

/// Factory function for creating in-memory vector store instances.
fn in_memory_vector_store_factory(
    _config: &VectorStoreProviderConfig,
) -> std::result::Result<Arc<dyn VectorStore>, String> {
    Ok(Arc::new(InMemoryVectorStore::new()))
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static MEMORY_PROVIDER: VectorStoreProviderEntry = VectorStoreProviderEntry {
    name: "memory",
    description: "In-process store with brute-force cosine search (non-persistent)",
    factory: in_memory_vector_store_factory,
};
