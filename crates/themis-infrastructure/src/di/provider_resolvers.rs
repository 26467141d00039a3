//! Provider resolution from configuration
//!
//! Model loaders and vector stores are looked up by name in the linkme
//! registries; document sources are a closed set picked by `source.kind`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use themis_application::ports::registry::{
    EmbeddingProviderConfig, VectorStoreProviderConfig, list_embedding_providers,
    list_vector_store_providers, resolve_embedding_provider, resolve_vector_store_provider,
};
use themis_domain::error::{Error, Result};
use themis_domain::ports::providers::{DocumentSource, ModelLoader, VectorStore};
use themis_providers::document_source::{HttpDocumentSource, JsonFileDocumentSource};

use crate::config::{EmbeddingConfig, SourceConfig, SourceKind, VectorStoreConfig};

/// Registry settings for the configured model loader
pub fn embedding_registry_config(config: &EmbeddingConfig) -> EmbeddingProviderConfig {
    let registry = EmbeddingProviderConfig::new(config.provider.clone())
        .with_download_progress(config.show_download_progress);
    match &config.cache_dir {
        Some(dir) => registry.with_cache_dir(dir.clone()),
        None => registry,
    }
}

/// Registry settings for the configured vector store
///
/// `provider` overrides the configured name, which lets the composition
/// root open the Qdrant collection a memory store preloads from.
pub fn vector_store_registry_config(
    config: &VectorStoreConfig,
    provider: &str,
) -> VectorStoreProviderConfig {
    let registry = VectorStoreProviderConfig::new(provider)
        .with_url(config.url.clone())
        .with_timeout(Duration::from_secs(config.timeout_secs))
        .with_scroll_page_size(config.scroll_page_size);
    match &config.api_key {
        Some(key) => registry.with_api_key(key.clone()),
        None => registry,
    }
}

/// Resolve the configured model loader
pub fn resolve_model_loader(config: &EmbeddingConfig) -> Result<Arc<dyn ModelLoader>> {
    resolve_embedding_provider(&embedding_registry_config(config))
        .map_err(|e| Error::configuration(format!("Embedding: {e}")))
}

/// Resolve the vector store registered as `provider`
pub fn resolve_vector_store(
    config: &VectorStoreConfig,
    provider: &str,
) -> Result<Arc<dyn VectorStore>> {
    resolve_vector_store_provider(&vector_store_registry_config(config, provider))
        .map_err(|e| Error::configuration(format!("VectorStore: {e}")))
}

/// Build the configured document source
pub fn resolve_document_source(config: &SourceConfig) -> Result<Arc<dyn DocumentSource>> {
    config.validate()?;
    match config.kind {
        SourceKind::Http => {
            let url = config.url.clone().unwrap_or_default();
            let source = HttpDocumentSource::new(
                url,
                config.api_key.as_deref(),
                Duration::from_secs(config.timeout_secs),
            )?;
            Ok(Arc::new(source))
        }
        SourceKind::File => {
            let path = config.path.clone().unwrap_or_default();
            Ok(Arc::new(JsonFileDocumentSource::new(path)))
        }
    }
}

/// List every registered provider
pub fn list_available_providers() -> AvailableProviders {
    AvailableProviders {
        embedding: list_embedding_providers(),
        vector_store: list_vector_store_providers(),
    }
}

/// Available providers by category
#[derive(Debug, Clone)]
pub struct AvailableProviders {
    /// Model loaders (name, description)
    pub embedding: Vec<(&'static str, &'static str)>,
    /// Vector stores (name, description)
    pub vector_store: Vec<(&'static str, &'static str)>,
}

impl fmt::Display for AvailableProviders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Embedding Providers:")?;
        for (name, desc) in &self.embedding {
            writeln!(f, "  - {name}: {desc}")?;
        }
        writeln!(f)?;
        writeln!(f, "Vector Store Providers:")?;
        for (name, desc) in &self.vector_store {
            writeln!(f, "  - {name}: {desc}")?;
        }
        Ok(())
    }
}
