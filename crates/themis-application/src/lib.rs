//! Application Layer - Themis
//!
//! Orchestrates the domain ports into the pipeline operations:
//!
//! - Chunking and embedding (`domain_services`)
//! - Index building, semantic search, clustering and cluster aggregation
//!   (`use_cases`)
//! - Compile-time provider registries (`ports::registry`)
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `themis-domain`: value objects, errors and port traits
//! - Pure Rust libraries for async, caching and registration

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use use_cases::*;
