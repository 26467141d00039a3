//! Vector Store Provider Registry
//!
//! Auto-registration system for vector store strategies.
//! Strategies register themselves via `#[linkme::distributed_slice]`.

use std::sync::Arc;
use std::time::Duration;

use themis_domain::ports::providers::VectorStore;

/// Configuration for vector store creation
#[derive(Debug, Clone, Default)]
pub struct VectorStoreProviderConfig {
    /// Strategy name (e.g., "qdrant", "memory")
    pub provider: String,
    /// Base URL of a remote store
    pub url: Option<String>,
    /// API key for the remote store
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Option<Duration>,
    /// Points fetched per scroll page
    pub scroll_page_size: Option<usize>,
}

impl VectorStoreProviderConfig {
    /// Create a new config with the given strategy name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the scroll page size
    pub fn with_scroll_page_size(mut self, size: usize) -> Self {
        self.scroll_page_size = Some(size);
        self
    }
}

/// Registry entry for vector store strategies
pub struct VectorStoreProviderEntry {
    /// Unique strategy name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create the store
    pub factory: fn(&VectorStoreProviderConfig) -> Result<Arc<dyn VectorStore>, String>,
}

#[linkme::distributed_slice]
pub static VECTOR_STORE_PROVIDERS: [VectorStoreProviderEntry] = [..];

/// Resolve a vector store strategy by name from the registry
pub fn resolve_vector_store_provider(
    config: &VectorStoreProviderConfig,
) -> Result<Arc<dyn VectorStore>, String> {
    if let Some(entry) = VECTOR_STORE_PROVIDERS
        .iter()
        .find(|e| e.name == config.provider)
    {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = VECTOR_STORE_PROVIDERS.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown vector store provider '{}'. Available providers: {:?}",
        config.provider, available
    ))
}

/// List all registered vector store strategies as (name, description)
pub fn list_vector_store_providers() -> Vec<(&'static str, &'static str)> {
    VECTOR_STORE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
