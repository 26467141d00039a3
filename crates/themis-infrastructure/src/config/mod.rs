//! Configuration
//!
//! [`AppConfig`] holds every section; [`ConfigLoader`] merges defaults, an
//! optional TOML file and `THEMIS_` environment variables, then validates.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_app_config, validate_partition_config};
pub use types::*;
