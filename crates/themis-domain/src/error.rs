//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Themis
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Invalid settings or missing credentials, fatal at startup
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The external document source could not be read
    #[error("Source fetch error: {message}")]
    SourceFetch {
        /// Description of the fetch failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An embedding model failed to load
    #[error("Model '{model}' unavailable: {message}")]
    ModelUnavailable {
        /// Requested model name
        model: String,
        /// Why loading failed
        message: String,
    },

    /// A loaded model failed to encode its input
    #[error("Embedding error: {message}")]
    Embedding {
        /// Description of the encoding failure
        message: String,
    },

    /// Upsert, collection creation or payload update failed
    #[error("Vector store write error: {message}")]
    StoreWrite {
        /// Description of the write failure
        message: String,
    },

    /// Scroll, search or count failed
    #[error("Vector store read error: {message}")]
    StoreRead {
        /// Description of the read failure
        message: String,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Missing or malformed request input
    #[error("Invalid input: {message}")]
    ClientInput {
        /// Description of the invalid input
        message: String,
    },

    /// Dimensionality reduction or density clustering failed
    #[error("Clustering error: {message}")]
    Clustering {
        /// Description of the clustering failure
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a client input error
    pub fn client_input<S: Into<String>>(message: S) -> Self {
        Self::ClientInput {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a clustering error
    pub fn clustering<S: Into<String>>(message: S) -> Self {
        Self::Clustering {
            message: message.into(),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Document source error creation methods
impl Error {
    /// Create a source fetch error
    pub fn source_fetch<S: Into<String>>(message: S) -> Self {
        Self::SourceFetch {
            message: message.into(),
            source: None,
        }
    }

    /// Create a source fetch error with source
    pub fn source_fetch_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::SourceFetch {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Embedding error creation methods
impl Error {
    /// Create a model unavailable error
    pub fn model_unavailable<M: Into<String>, S: Into<String>>(model: M, message: S) -> Self {
        Self::ModelUnavailable {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding<S: Into<String>>(message: S) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }
}

// Vector store error creation methods
impl Error {
    /// Create a store write error
    pub fn store_write<S: Into<String>>(message: S) -> Self {
        Self::StoreWrite {
            message: message.into(),
        }
    }

    /// Create a store read error
    pub fn store_read<S: Into<String>>(message: S) -> Self {
        Self::StoreRead {
            message: message.into(),
        }
    }
}

impl Error {
    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ClientInput { .. })
    }

    /// Whether the error signals a missing resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
