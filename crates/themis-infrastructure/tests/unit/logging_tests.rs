//! Logging Tests

use themis_domain::error::Error;
use themis_infrastructure::constants::DEFAULT_LOG_LEVEL;
use themis_infrastructure::logging::{LoggingConfig, init_logging, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").expect("trace"), Level::TRACE);
    assert_eq!(parse_log_level("debug").expect("debug"), Level::DEBUG);
    assert_eq!(parse_log_level("INFO").expect("info"), Level::INFO);
    assert_eq!(parse_log_level("warning").expect("warn"), Level::WARN);
    assert_eq!(parse_log_level("error").expect("error"), Level::ERROR);

    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, DEFAULT_LOG_LEVEL);
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
}

#[test]
fn test_invalid_level_rejected_before_install() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_second_install_is_configuration_error() {
    let config = LoggingConfig::default();
    // The first call may or may not win the global subscriber slot
    let _ = init_logging(&config);
    match init_logging(&config) {
        Err(Error::Configuration { message, source }) => {
            assert!(message.starts_with("Failed to install log subscriber"));
            assert!(source.is_some());
        }
        other => panic!("Expected configuration error, got {other:?}"),
    }
}
