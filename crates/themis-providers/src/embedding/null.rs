//! Null model loader for testing and offline use
//!
//! Produces deterministic feature-hashed embeddings: lowercase word tokens
//! and their character trigrams are hashed into a fixed number of buckets
//! and the result is L2-normalised. Texts sharing vocabulary score close
//! under cosine similarity, so search behaves sensibly without a model
//! download.

use std::sync::Arc;

use async_trait::async_trait;
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::{EmbeddingModel, ModelLoader};
use themis_domain::value_objects::Vector;

use crate::constants::EMBEDDING_DIMENSION_NULL;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Weight of a whole-word feature relative to a trigram
const WORD_WEIGHT: f32 = 1.0;
const TRIGRAM_WEIGHT: f32 = 0.5;

/// Feature-hashing embedding model
pub struct NullEmbeddingModel {
    name: String,
    dimensions: usize,
}

impl NullEmbeddingModel {
    /// Create a model reporting `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimensions: EMBEDDING_DIMENSION_NULL,
        }
    }

    fn embed_text(&self, text: &str) -> Vector {
        let mut vector = vec![0.0f32; self.dimensions];
        let lower = text.to_lowercase();
        for word in lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            vector[self.bucket(word.as_bytes())] += WORD_WEIGHT;
            let chars: Vec<char> = word.chars().collect();
            for trigram in chars.windows(3) {
                let trigram: String = trigram.iter().collect();
                vector[self.bucket(trigram.as_bytes())] += TRIGRAM_WEIGHT;
            }
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }

    fn bucket(&self, bytes: &[u8]) -> usize {
        let hash = bytes.iter().fold(FNV_OFFSET, |hash, &b| {
            (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
        });
        (hash % self.dimensions as u64) as usize
    }
}

#[async_trait]
impl EmbeddingModel for NullEmbeddingModel {
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vector>> {
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}

/// Loader handing out [`NullEmbeddingModel`]s under any non-empty name
#[derive(Debug, Default, Clone, Copy)]
pub struct NullModelLoader;

impl NullModelLoader {
    /// Create a new null loader
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ModelLoader for NullModelLoader {
    async fn load(&self, model_name: &str) -> Result<Arc<dyn EmbeddingModel>> {
        if model_name.trim().is_empty() {
            return Err(Error::model_unavailable(model_name, "empty model name"));
        }
        Ok(Arc::new(NullEmbeddingModel::new(model_name)))
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use themis_application::ports::registry::{
    EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry,
};

fn null_loader_factory(
    _config: &EmbeddingProviderConfig,
) -> std::result::Result<Arc<dyn ModelLoader>, String> {
    Ok(Arc::new(NullModelLoader::new()))
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static NULL_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "null",
    description: "Deterministic feature-hashing model for tests and offline use",
    factory: null_loader_factory,
};
