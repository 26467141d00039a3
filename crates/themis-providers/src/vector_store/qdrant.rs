//! Qdrant vector store provider
//!
//! Talks to a Qdrant server over its REST API. Collections use cosine
//! distance; writes are sent with `wait=true` so each call returns only
//! once the server has acknowledged it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::VectorStore;
use themis_domain::value_objects::{
    ChunkPayload, PayloadFilter, Point, ScoredPoint, ScrollQuery, ScrollResult, Vector,
    is_valid_vector,
};
use tracing::{debug, warn};

use crate::constants::{
    QDRANT_API_KEY_HEADER, QDRANT_MAX_ATTEMPTS, QDRANT_SCROLL_PAGE_SIZE_DEFAULT,
    QDRANT_TIMEOUT_SECS_DEFAULT,
};
use crate::utils::HttpResponseUtils;

/// Qdrant REST client implementing [`VectorStore`]
#[derive(Clone)]
pub struct QdrantVectorStore {
    client: Client,
    base_url: String,
    scroll_page_size: usize,
    max_attempts: usize,
}

impl QdrantVectorStore {
    /// Build a client for the server at `url`
    ///
    /// # Arguments
    /// * `url` - Server base URL, e.g. `http://localhost:6333`
    /// * `api_key` - Value for the `api-key` header, when the server requires one
    /// * `timeout` - Per-request timeout
    pub fn new(url: &str, api_key: Option<&str>, timeout: Duration) -> Result<Self> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::configuration(format!(
                "Qdrant URL must be an http(s) URL, got '{url}'"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
            let value = HeaderValue::from_str(key)
                .map_err(|e| Error::configuration_with_source("Invalid Qdrant API key", e))?;
            headers.insert(QDRANT_API_KEY_HEADER, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::configuration_with_source("Failed to build Qdrant HTTP client", e))?;

        Ok(Self {
            client,
            base_url: url.trim_end_matches('/').to_string(),
            scroll_page_size: QDRANT_SCROLL_PAGE_SIZE_DEFAULT,
            max_attempts: QDRANT_MAX_ATTEMPTS,
        })
    }

    /// Override the number of points fetched per scroll page
    #[must_use]
    pub fn with_scroll_page_size(mut self, size: usize) -> Self {
        self.scroll_page_size = size.max(1);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request, retrying connection failures, 429 and 5xx
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        make_error: fn(String) -> Error,
    ) -> Result<Response> {
        let mut attempt = 0usize;
        loop {
            let mut request = self.client.request(method.clone(), self.url(path));
            if let Some(body) = body {
                request = request.json(body);
            }
            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if HttpResponseUtils::should_retry(status) && attempt + 1 < self.max_attempts {
                        attempt += 1;
                        warn!(%status, path, attempt, "Retrying Qdrant request");
                        tokio::time::sleep(HttpResponseUtils::retry_backoff(attempt)).await;
                        continue;
                    }
                    return Ok(response);
                }
                Err(err) => {
                    if (err.is_connect() || err.is_timeout()) && attempt + 1 < self.max_attempts {
                        attempt += 1;
                        warn!(error = %err, path, attempt, "Retrying Qdrant request");
                        tokio::time::sleep(HttpResponseUtils::retry_backoff(attempt)).await;
                        continue;
                    }
                    return Err(make_error(format!("Qdrant request {method} {path} failed: {err}")));
                }
            }
        }
    }

    /// Collection info, `None` when the collection does not exist
    async fn collection_info(&self, collection: &str) -> Result<Option<CollectionInfo>> {
        let path = format!("/collections/{collection}");
        let response = self.send(Method::GET, &path, None, read_error).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body: QdrantResponse<CollectionInfo> =
            HttpResponseUtils::check_and_parse(response, "Qdrant collection info", read_error)
                .await?;
        Ok(Some(body.result))
    }

    async fn collection_dimension(&self, collection: &str) -> Result<usize> {
        self.collection_info(collection)
            .await?
            .ok_or_else(|| Error::store_read(format!("Collection '{collection}' not found")))?
            .dimension()
            .ok_or_else(|| {
                Error::store_read(format!("Collection '{collection}' has no single vector size"))
            })
    }
}

fn read_error(message: String) -> Error {
    Error::store_read(message)
}

fn write_error(message: String) -> Error {
    Error::store_write(message)
}

/// Qdrant filter clause for a payload filter
fn filter_to_json(filter: &PayloadFilter) -> Value {
    let condition = match filter {
        PayloadFilter::Equals { field, value } => {
            json!({"key": field, "match": {"value": value}})
        }
        PayloadFilter::AnyOf { field, values } => {
            json!({"key": field, "match": {"any": values}})
        }
    };
    json!({"must": [condition]})
}

fn point_id_to_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn vector_from_json(value: Option<&Value>) -> Option<Vector> {
    value?
        .as_array()?
        .iter()
        .map(|v| v.as_f64().map(|f| f as f32))
        .collect()
}

#[derive(Debug, Deserialize)]
struct QdrantResponse<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct CollectionInfo {
    #[serde(default)]
    points_count: Option<u64>,
    #[serde(default)]
    config: Value,
}

impl CollectionInfo {
    fn dimension(&self) -> Option<usize> {
        self.config
            .pointer("/params/vectors/size")
            .and_then(Value::as_u64)
            .map(|d| d as usize)
    }
}

#[derive(Debug, Deserialize)]
struct Record {
    id: Value,
    #[serde(default)]
    payload: Option<Map<String, Value>>,
    #[serde(default)]
    vector: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ScoredRecord {
    id: Value,
    score: f32,
    #[serde(default)]
    payload: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct ScrollPage {
    points: Vec<Record>,
    #[serde(default)]
    next_page_offset: Option<Value>,
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn create_or_replace(&self, collection: &str, dimension: usize) -> Result<()> {
        let path = format!("/collections/{collection}");
        let response = self.send(Method::DELETE, &path, None, write_error).await?;
        if response.status() != StatusCode::NOT_FOUND {
            HttpResponseUtils::check_status(response, "Qdrant delete collection", write_error)
                .await?;
        }

        let body = json!({"vectors": {"size": dimension, "distance": "Cosine"}});
        let response = self.send(Method::PUT, &path, Some(&body), write_error).await?;
        HttpResponseUtils::check_status(response, "Qdrant create collection", write_error).await?;
        debug!(collection, dimension, "Qdrant collection created");
        Ok(())
    }

    async fn upsert_batch(&self, collection: &str, points: &[Point]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        let points: Vec<Value> = points
            .iter()
            .map(|p| json!({"id": p.id, "vector": p.vector, "payload": p.payload.to_json()}))
            .collect();
        let body = json!({ "points": points });
        let path = format!("/collections/{collection}/points?wait=true");
        let response = self.send(Method::PUT, &path, Some(&body), write_error).await?;
        HttpResponseUtils::check_status(response, "Qdrant upsert", write_error).await?;
        debug!(collection, points = points.len(), "Qdrant batch acknowledged");
        Ok(())
    }

    async fn scroll(&self, collection: &str, query: &ScrollQuery) -> Result<ScrollResult> {
        let dimension = if query.with_vectors {
            Some(self.collection_dimension(collection).await?)
        } else {
            None
        };

        let path = format!("/collections/{collection}/points/scroll");
        let with_payload = query
            .payload_fields
            .as_ref()
            .map_or(Value::Bool(true), |fields| json!(fields));
        let mut result = ScrollResult::default();
        let mut offset: Option<Value> = None;

        loop {
            let mut body = json!({
                "limit": self.scroll_page_size,
                "with_payload": with_payload,
                "with_vector": query.with_vectors,
            });
            if let Some(filter) = &query.filter {
                body["filter"] = filter_to_json(filter);
            }
            if let Some(offset) = &offset {
                body["offset"] = offset.clone();
            }

            let response = self.send(Method::POST, &path, Some(&body), read_error).await?;
            let page: QdrantResponse<ScrollPage> =
                HttpResponseUtils::check_and_parse(response, "Qdrant scroll", read_error).await?;

            for record in page.result.points {
                let vector = match dimension {
                    Some(dimension) => match vector_from_json(record.vector.as_ref()) {
                        Some(v) if is_valid_vector(&v, dimension) => v,
                        _ => {
                            result.invalid_vectors += 1;
                            continue;
                        }
                    },
                    None => Vec::new(),
                };
                let Some(payload) = record.payload.as_ref().and_then(ChunkPayload::from_json) else {
                    result.invalid_payloads += 1;
                    continue;
                };
                result.points.push(Point {
                    id: point_id_to_string(&record.id),
                    vector,
                    payload,
                });
            }

            match page.result.next_page_offset {
                Some(next) if !next.is_null() => offset = Some(next),
                _ => break,
            }
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
        let mut body = json!({
            "vector": query_vector,
            "limit": limit,
            "with_payload": true,
        });
        if let Some(filter) = filter {
            body["filter"] = filter_to_json(filter);
        }
        let path = format!("/collections/{collection}/points/search");
        let response = self.send(Method::POST, &path, Some(&body), read_error).await?;
        let hits: QdrantResponse<Vec<ScoredRecord>> =
            HttpResponseUtils::check_and_parse(response, "Qdrant search", read_error).await?;

        let mut scored = Vec::with_capacity(hits.result.len());
        for hit in hits.result {
            match hit.payload.as_ref().and_then(ChunkPayload::from_json) {
                Some(payload) => scored.push(ScoredPoint {
                    id: point_id_to_string(&hit.id),
                    score: hit.score,
                    payload,
                }),
                None => warn!(collection, id = %hit.id, "Search hit with invalid payload skipped"),
            }
        }
        Ok(scored)
    }

    async fn set_payload_field(
        &self,
        collection: &str,
        point_ids: &[String],
        field: &str,
        value: Value,
    ) -> Result<()> {
        if point_ids.is_empty() {
            return Ok(());
        }
        let mut payload = Map::new();
        payload.insert(field.to_string(), value);
        let body = json!({"payload": payload, "points": point_ids});
        let path = format!("/collections/{collection}/points/payload?wait=true");
        let response = self.send(Method::POST, &path, Some(&body), write_error).await?;
        HttpResponseUtils::check_status(response, "Qdrant set payload", write_error).await?;
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<Option<u64>> {
        Ok(self
            .collection_info(collection)
            .await?
            .map(|info| info.points_count.unwrap_or(0)))
    }

    fn provider_name(&self) -> &str {
        "qdrant"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use themis_application::ports::registry::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
};

/// Factory function for creating Qdrant vector store instances.
fn qdrant_vector_store_factory(
    config: &VectorStoreProviderConfig,
) -> std::result::Result<Arc<dyn VectorStore>, String> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| "Qdrant provider requires a url".to_string())?;
    let timeout = config
        .timeout
        .unwrap_or(Duration::from_secs(QDRANT_TIMEOUT_SECS_DEFAULT));
    let mut store = QdrantVectorStore::new(url, config.api_key.as_deref(), timeout)
        .map_err(|e| format!("Failed to create Qdrant store: {e}"))?;
    if let Some(size) = config.scroll_page_size {
        store = store.with_scroll_page_size(size);
    }
    Ok(Arc::new(store))
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static QDRANT_PROVIDER: VectorStoreProviderEntry = VectorStoreProviderEntry {
    name: "qdrant",
    description: "Qdrant server over REST (cosine distance, acknowledged writes)",
    factory: qdrant_vector_store_factory,
};
