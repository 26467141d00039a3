//! Embedding orchestration
//!
//! [`ModelCache`] keeps every loaded model for the lifetime of the process.
//! It is created once by the composition root and shared by reference; it
//! has no capacity bound and no expiry, so a model is loaded at most once.
//! [`Embedder`] resolves models through the cache and applies the query
//! prefix.

use std::sync::Arc;

use moka::future::Cache;
use themis_domain::constants::QUERY_PREFIX;
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::{EmbeddingModel, ModelLoader};
use themis_domain::value_objects::Vector;
use tracing::info;

/// Process-wide cache of loaded embedding models, keyed by model name
#[derive(Clone)]
pub struct ModelCache {
    models: Cache<String, Arc<dyn EmbeddingModel>>,
}

impl ModelCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            models: Cache::builder().build(),
        }
    }

    /// Return the cached model or load it with `loader`
    ///
    /// Concurrent callers asking for the same missing name share a single
    /// load. A failed load is not cached, so a later call retries.
    pub async fn get_or_load(
        &self,
        model_name: &str,
        loader: &dyn ModelLoader,
    ) -> Result<Arc<dyn EmbeddingModel>> {
        self.models
            .try_get_with(model_name.to_string(), async {
                info!(model = model_name, loader = loader.provider_name(), "Loading embedding model");
                loader.load(model_name).await
            })
            .await
            .map_err(|e| match e.as_ref() {
                Error::ModelUnavailable { model, message } => {
                    Error::model_unavailable(model.clone(), message.clone())
                }
                other => Error::model_unavailable(model_name, other.to_string()),
            })
    }

    /// Whether `model_name` has already been loaded
    pub fn contains(&self, model_name: &str) -> bool {
        self.models.contains_key(model_name)
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns text into vectors with a cached model
#[derive(Clone)]
pub struct Embedder {
    loader: Arc<dyn ModelLoader>,
    cache: ModelCache,
}

impl Embedder {
    /// Create an embedder over `loader`, sharing `cache`
    pub fn new(loader: Arc<dyn ModelLoader>, cache: ModelCache) -> Self {
        Self { loader, cache }
    }

    /// Load (or fetch from cache) the model called `model_name`
    pub async fn load(&self, model_name: &str) -> Result<Arc<dyn EmbeddingModel>> {
        self.cache.get_or_load(model_name, self.loader.as_ref()).await
    }

    /// Output dimension of `model_name`
    pub async fn dimension(&self, model_name: &str) -> Result<usize> {
        Ok(self.load(model_name).await?.dimensions())
    }

    /// Embed a single text
    pub async fn embed_one(&self, text: &str, model_name: &str, is_query: bool) -> Result<Vector> {
        let mut vectors = self
            .embed_batch(&[text.to_string()], model_name, is_query)
            .await?;
        vectors
            .pop()
            .ok_or_else(|| Error::embedding("Model returned no vector for a single input"))
    }

    /// Embed `texts`, returning one vector per input in the same order
    pub async fn embed_batch(
        &self,
        texts: &[String],
        model_name: &str,
        is_query: bool,
    ) -> Result<Vec<Vector>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let model = self.load(model_name).await?;
        let vectors = if is_query {
            let prefixed: Vec<String> = texts.iter().map(|t| format!("{QUERY_PREFIX}{t}")).collect();
            model.encode(&prefixed).await?
        } else {
            model.encode(texts).await?
        };
        if vectors.len() != texts.len() {
            return Err(Error::embedding(format!(
                "Model '{}' returned {} vectors for {} inputs",
                model.model_name(),
                vectors.len(),
                texts.len()
            )));
        }
        Ok(vectors)
    }
}
