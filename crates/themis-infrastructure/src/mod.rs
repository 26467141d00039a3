//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns shared by the HTTP server and the CLI.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML + environment configuration (figment) |
//! | [`logging`] | Structured logging with tracing |
//! | [`di`] | Composition root: providers resolved from the linkme registries |
//! | [`constants`] | Infrastructure defaults |
//! | [`error_ext`] | Context helpers for foreign errors |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader};
pub use di::{AppContext, init_app};
pub use error_ext::ErrorContext;
