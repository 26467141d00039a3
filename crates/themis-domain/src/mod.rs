//! # Themis - Domain Layer
//!
//! Core types of the legal-text indexing pipeline: the error taxonomy,
//! value objects (documents, chunks, points, reports) and the ports that
//! providers implement.
//!
//! This crate has no knowledge of any concrete store, model or transport.

/// Domain-wide constants
pub mod constants;

/// Error types
pub mod error;

/// Provider ports
pub mod ports;

/// Value objects
pub mod value_objects;

pub use error::{Error, Result};
