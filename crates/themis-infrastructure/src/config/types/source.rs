//! Document source configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use themis_domain::error::{Error, Result};

use crate::constants::DEFAULT_SOURCE_TIMEOUT_SECS;

/// Kind of document source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Article API over HTTP
    #[default]
    Http,
    /// Local JSON export
    File,
}

/// Document source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Source kind
    pub kind: SourceKind,

    /// Article API endpoint (`http`)
    pub url: Option<String>,

    /// Value sent as `x-api-key` (`http`)
    pub api_key: Option<String>,

    /// JSON file path (`file`)
    pub path: Option<PathBuf>,

    /// Request timeout in seconds (`http`)
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Http,
            url: None,
            api_key: None,
            path: None,
            timeout_secs: DEFAULT_SOURCE_TIMEOUT_SECS,
        }
    }
}

impl SourceConfig {
    /// Check that the fields required by `kind` are present
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            SourceKind::Http if self.url.as_deref().is_none_or(str::is_empty) => Err(
                Error::configuration("source.url is required when source.kind is \"http\""),
            ),
            SourceKind::File if self.path.is_none() => Err(Error::configuration(
                "source.path is required when source.kind is \"file\"",
            )),
            _ => Ok(()),
        }
    }
}
