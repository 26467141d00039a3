use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::Vector;

/// A loaded embedding model
///
/// Handles are shared across request handlers once cached, so
/// implementations must tolerate concurrent `encode` calls.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Encode `texts` verbatim, preserving input order
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vector>>;

    /// Output dimension of every vector
    fn dimensions(&self) -> usize;

    /// Name the model was loaded under
    fn model_name(&self) -> &str;
}

/// Turns a model name into a loaded model
///
/// Loading is expensive; callers go through the model cache rather than
/// calling this directly.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Load `model_name`
    ///
    /// # Returns
    /// The loaded model, or `ModelUnavailable` when the name is unknown or
    /// loading fails. Implementations never substitute another model.
    async fn load(&self, model_name: &str) -> Result<Arc<dyn EmbeddingModel>>;

    /// Get the name/identifier of this loader
    fn provider_name(&self) -> &str;
}
