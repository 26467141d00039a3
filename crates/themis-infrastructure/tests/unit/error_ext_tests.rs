//! Error Extension Tests

use std::io;

use themis_domain::error::{Error, Result};
use themis_infrastructure::error_ext::ErrorContext;

#[test]
fn test_config_context_keeps_source() {
    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
    let result: Result<()> = Err(io_error).config_context("Failed to write config file");

    match result {
        Err(Error::Configuration { message, source }) => {
            assert!(message.starts_with("Failed to write config file"));
            assert!(message.contains("denied"));
            assert!(source.is_some());
        }
        other => panic!("Expected configuration error, got {other:?}"),
    }
}
