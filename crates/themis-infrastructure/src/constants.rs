//! Infrastructure layer constants
//!
//! Domain constants (chunk sizes, payload field names) live in
//! `themis_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "themis.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "themis";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "THEMIS";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable that overrides the configured filter
pub const LOG_FILTER_ENV: &str = "THEMIS_LOG";

/// File name prefix of rolling log files
pub const LOG_FILE_PREFIX: &str = "themis";

// ============================================================================
// HTTP SERVER CONSTANTS
// ============================================================================

/// Default HTTP server port
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Default bind address
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1";

/// API key header name
pub const API_KEY_HEADER: &str = "x-api-key";

// ============================================================================
// PROVIDER CONSTANTS
// ============================================================================

/// Default model loader
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "fastembed";

/// Default embedding model
pub const DEFAULT_EMBEDDING_MODEL: &str = "multilingual-e5-large";

/// Default vector store
pub const DEFAULT_VECTOR_STORE_PROVIDER: &str = "qdrant";

/// Default Qdrant REST endpoint
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6333";

/// Default collection holding the chunk vectors
pub const DEFAULT_COLLECTION: &str = "articles_chunked";

/// Document source request timeout in seconds
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// CLUSTERING CONSTANTS
// ============================================================================

/// Smallest neighborhood the reducer accepts
pub const MIN_REDUCTION_NEIGHBORS: usize = 2;

/// Smallest cluster size the clusterer accepts
pub const MIN_CLUSTER_SIZE: usize = 2;
