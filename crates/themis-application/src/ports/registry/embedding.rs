//! Embedding Model Loader Registry
//!
//! Auto-registration system for model loaders using linkme distributed slices.
//! Loaders register themselves via `#[linkme::distributed_slice]` and are
//! discovered at runtime.

use std::path::PathBuf;
use std::sync::Arc;

use themis_domain::ports::providers::ModelLoader;

/// Configuration for model loader creation
///
/// Loaders use what they need and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingProviderConfig {
    /// Loader name (e.g., "fastembed", "null")
    pub provider: String,
    /// Directory where downloaded model files are kept
    pub cache_dir: Option<PathBuf>,
    /// Show download progress on first load
    pub show_download_progress: bool,
}

impl EmbeddingProviderConfig {
    /// Create a new config with the given loader name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the model file cache directory
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    /// Show download progress
    pub fn with_download_progress(mut self, show: bool) -> Self {
        self.show_download_progress = show;
        self
    }
}

/// Registry entry for model loaders
pub struct EmbeddingProviderEntry {
    /// Unique loader name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create the loader
    pub factory: fn(&EmbeddingProviderConfig) -> Result<Arc<dyn ModelLoader>, String>,
}

// Auto-collection via linkme distributed slices - providers submit entries at compile time
#[linkme::distributed_slice]
pub static EMBEDDING_PROVIDERS: [EmbeddingProviderEntry] = [..];

/// Resolve a model loader by name from the registry
///
/// # Returns
/// * `Ok(Arc<dyn ModelLoader>)` - Created loader
/// * `Err(String)` - Error message if the name is unknown or creation failed
pub fn resolve_embedding_provider(
    config: &EmbeddingProviderConfig,
) -> Result<Arc<dyn ModelLoader>, String> {
    if let Some(entry) = EMBEDDING_PROVIDERS.iter().find(|e| e.name == config.provider) {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = EMBEDDING_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown embedding provider '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered model loaders as (name, description)
pub fn list_embedding_providers() -> Vec<(&'static str, &'static str)> {
    EMBEDDING_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
