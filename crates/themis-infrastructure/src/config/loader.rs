//! Configuration loader
//!
//! Sources are merged in order, later ones overriding earlier ones:
//! 1. `AppConfig::default()`
//! 2. A TOML file (explicit path, or the first default location found)
//! 3. Environment variables, e.g. `THEMIS_SERVER__API_KEY`

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use themis_domain::error::{Error, Result};

use crate::config::{AppConfig, PartitionConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
    MIN_CLUSTER_SIZE, MIN_REDUCTION_NEIGHBORS,
};
use crate::logging::log_config_loaded;

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    #[must_use]
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and validate configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(path) if path.exists() => {
                figment = figment.merge(Toml::file(path));
                log_config_loaded(path, true);
            }
            Some(path) => {
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            None => {
                if let Some(path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&path));
                    log_config_loaded(&path, true);
                }
            }
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let config: AppConfig = figment
            .extract()
            .map_err(|e| Error::configuration(format!("Failed to extract configuration: {e}")))?;

        validate_app_config(&config)?;
        Ok(config)
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;
        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        ];
        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate every configuration section
///
/// The document source is checked when it is built, since only indexing
/// needs one.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_server_config(config)?;
    validate_indexing_config(config)?;
    validate_vector_store_config(config)?;
    validate_clustering_config(config)?;
    Ok(())
}

fn validate_server_config(config: &AppConfig) -> Result<()> {
    if config.server.port == 0 {
        return Err(Error::configuration("Server port cannot be 0"));
    }
    if config.server.api_key_header.trim().is_empty() {
        return Err(Error::configuration("server.api_key_header cannot be empty"));
    }
    Ok(())
}

fn validate_indexing_config(config: &AppConfig) -> Result<()> {
    let indexing = &config.indexing;
    if indexing.chunk_size == 0 {
        return Err(Error::configuration("indexing.chunk_size must be positive"));
    }
    if indexing.chunk_overlap >= indexing.chunk_size {
        return Err(Error::configuration(format!(
            "indexing.chunk_overlap ({}) must be smaller than indexing.chunk_size ({})",
            indexing.chunk_overlap, indexing.chunk_size
        )));
    }
    if indexing.upsert_batch_size == 0 {
        return Err(Error::configuration("indexing.upsert_batch_size must be positive"));
    }
    Ok(())
}

fn validate_vector_store_config(config: &AppConfig) -> Result<()> {
    let store = &config.vector_store;
    if store.collection.trim().is_empty() {
        return Err(Error::configuration("vector_store.collection cannot be empty"));
    }
    if store.scroll_page_size == 0 {
        return Err(Error::configuration("vector_store.scroll_page_size must be positive"));
    }
    if store.timeout_secs == 0 {
        return Err(Error::configuration("vector_store.timeout_secs must be positive"));
    }
    Ok(())
}

fn validate_clustering_config(config: &AppConfig) -> Result<()> {
    let clustering = &config.clustering;
    if clustering.update_batch_size == 0 {
        return Err(Error::configuration("clustering.update_batch_size must be positive"));
    }
    if clustering.min_dist.is_nan() || clustering.min_dist < 0.0 {
        return Err(Error::configuration("clustering.min_dist must be non-negative"));
    }
    for partition in &clustering.partitions {
        validate_partition_config(partition)?;
    }
    Ok(())
}

/// Validate one clustering partition
pub fn validate_partition_config(partition: &PartitionConfig) -> Result<()> {
    let code = partition.code_parent.as_str();
    if code.trim().is_empty() {
        return Err(Error::configuration("clustering partition without code_parent"));
    }
    if partition.n_neighbors < MIN_REDUCTION_NEIGHBORS {
        return Err(Error::configuration(format!(
            "Partition {code}: n_neighbors must be at least {MIN_REDUCTION_NEIGHBORS}"
        )));
    }
    if partition.n_components == 0 {
        return Err(Error::configuration(format!(
            "Partition {code}: n_components must be at least 1"
        )));
    }
    if partition.min_cluster_size < MIN_CLUSTER_SIZE {
        return Err(Error::configuration(format!(
            "Partition {code}: min_cluster_size must be at least {MIN_CLUSTER_SIZE}"
        )));
    }
    if partition.min_samples == Some(0) {
        return Err(Error::configuration(format!(
            "Partition {code}: min_samples must be positive"
        )));
    }
    Ok(())
}
