//! Error extension utilities
//!
//! Attach context to foreign errors while converting them to the domain
//! [`Error`].

use std::fmt;

use themis_domain::error::{Error, Result};

/// Extension trait for adding context to errors
///
/// # Example
///
/// ```ignore
/// use themis_infrastructure::error_ext::ErrorContext;
///
/// subscriber.try_init().config_context("Failed to install log subscriber")?;
/// ```
pub trait ErrorContext<T> {
    /// Wrap the error as a configuration failure, keeping it as the source
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|err| Error::configuration_with_source(format!("{context}: {err}"), err))
    }
}
