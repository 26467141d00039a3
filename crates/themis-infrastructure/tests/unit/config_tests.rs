//! Configuration loading and validation tests

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};
use themis_domain::error::Error;
use themis_infrastructure::config::{
    AppConfig, ConfigLoader, PartitionConfig, SourceConfig, SourceKind, validate_app_config,
};
use themis_infrastructure::constants::{DEFAULT_COLLECTION, DEFAULT_HTTP_PORT, DEFAULT_LOG_LEVEL};
use themis_providers::constants::{QDRANT_SCROLL_PAGE_SIZE_DEFAULT, QDRANT_TIMEOUT_SECS_DEFAULT};

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

/// Loader that ignores real `THEMIS_*` variables of the test environment
fn isolated_loader(path: &std::path::Path) -> ConfigLoader {
    ConfigLoader::new()
        .with_config_path(path)
        .with_env_prefix("THEMIS_UNIT_TEST_UNUSED")
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.server.port, DEFAULT_HTTP_PORT);
    assert_eq!(config.server.api_key_header, "x-api-key");
    assert!(config.server.api_key.is_none());
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert_eq!(config.embedding.provider, "fastembed");
    assert_eq!(config.embedding.model, "multilingual-e5-large");
    assert_eq!(config.vector_store.provider, "qdrant");
    assert_eq!(config.vector_store.collection, DEFAULT_COLLECTION);
    assert_eq!(config.vector_store.timeout_secs, QDRANT_TIMEOUT_SECS_DEFAULT);
    assert_eq!(config.vector_store.scroll_page_size, QDRANT_SCROLL_PAGE_SIZE_DEFAULT);
    assert_eq!(config.source.timeout_secs, 60);
    assert_eq!(config.indexing.chunk_size, 1000);
    assert_eq!(config.indexing.chunk_overlap, 200);
    assert!(config.indexing.on_startup);
    validate_app_config(&config).expect("defaults are valid");
}

#[test]
fn test_default_partitions() {
    let jobs = AppConfig::default().clustering.jobs();
    assert_eq!(jobs.len(), 2);

    assert_eq!(jobs[0].partition_key, "LEGITEXT000006071307");
    assert_eq!(jobs[0].reduction.n_neighbors, 15);
    assert_eq!(jobs[0].reduction.n_components, 30);
    assert_eq!(jobs[0].reduction.seed, 42);
    assert_eq!(jobs[0].clustering.min_cluster_size, 82);
    assert_eq!(jobs[0].clustering.min_samples, Some(13));

    assert_eq!(jobs[1].partition_key, "LEGITEXT000044416551");
    assert_eq!(jobs[1].clustering.min_cluster_size, 34);
    assert_eq!(jobs[1].clustering.min_samples, Some(29));
}

#[test]
fn test_toml_file_overrides_defaults() {
    let file = toml_file(
        r#"
[server]
port = 9090
api_key = "secret"

[vector_store]
provider = "memory"
collection = "test_collection"

[source]
kind = "file"
path = "/tmp/articles.json"

[clustering]
seed = 7

[[clustering.partitions]]
code_parent = "LEGITEXT000000000001"
n_neighbors = 5
n_components = 2
min_cluster_size = 3
"#,
    );

    let config = isolated_loader(file.path()).load().expect("load");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.api_key.as_deref(), Some("secret"));
    assert_eq!(config.server.address, "127.0.0.1");
    assert_eq!(config.vector_store.provider, "memory");
    assert_eq!(config.vector_store.collection, "test_collection");
    assert_eq!(config.source.kind, SourceKind::File);
    assert_eq!(config.indexing.chunk_size, 1000);

    let jobs = config.clustering.jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].reduction.seed, 7);
    assert_eq!(jobs[0].clustering.min_samples, None);
    assert_eq!(jobs[0].clustering.effective_min_samples(), 3);
}

#[test]
fn test_environment_overrides_file() {
    let file = toml_file("[server]\nport = 9090\n");
    // Unique prefix so parallel tests never observe these variables
    unsafe {
        std::env::set_var("THEMIS_ENV_TEST_SERVER__PORT", "7070");
        std::env::set_var("THEMIS_ENV_TEST_VECTOR_STORE__COLLECTION", "from_env");
    }

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .with_env_prefix("THEMIS_ENV_TEST")
        .load()
        .expect("load");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.vector_store.collection, "from_env");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = isolated_loader(&dir.path().join("absent.toml")).load().err();
    assert!(matches!(err, Some(Error::Configuration { .. })));
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = toml_file("[server]\nport = \"not a number\"\n");
    let err = isolated_loader(file.path()).load().err();
    assert!(matches!(err, Some(Error::Configuration { .. })));
}

#[test]
fn test_validation_rejects_bad_values() {
    let cases: [(&str, fn(&mut AppConfig)); 10] = [
        ("port", |c: &mut AppConfig| c.server.port = 0),
        ("overlap", |c: &mut AppConfig| {
            c.indexing.chunk_overlap = c.indexing.chunk_size;
        }),
        ("chunk size", |c: &mut AppConfig| c.indexing.chunk_size = 0),
        ("upsert batch", |c: &mut AppConfig| c.indexing.upsert_batch_size = 0),
        ("update batch", |c: &mut AppConfig| c.clustering.update_batch_size = 0),
        ("collection", |c: &mut AppConfig| c.vector_store.collection = String::new()),
        ("n_neighbors", |c: &mut AppConfig| c.clustering.partitions[0].n_neighbors = 1),
        ("n_components", |c: &mut AppConfig| c.clustering.partitions[0].n_components = 0),
        ("min_cluster_size", |c: &mut AppConfig| {
            c.clustering.partitions[1].min_cluster_size = 1;
        }),
        ("min_samples", |c: &mut AppConfig| c.clustering.partitions[1].min_samples = Some(0)),
    ];
    for (name, mutate) in cases {
        let mut config = AppConfig::default();
        mutate(&mut config);
        assert!(
            matches!(validate_app_config(&config), Err(Error::Configuration { .. })),
            "{name} should be rejected"
        );
    }
}

#[test]
fn test_source_requirements() {
    assert!(SourceConfig::default().validate().is_err());

    let http = SourceConfig {
        url: Some("https://api.example.org/articles".to_string()),
        ..SourceConfig::default()
    };
    assert!(http.validate().is_ok());

    let file = SourceConfig {
        kind: SourceKind::File,
        ..SourceConfig::default()
    };
    assert!(file.validate().is_err());
}

#[test]
fn test_api_key_required_to_serve() {
    let mut config = AppConfig::default();
    assert!(config.server.require_api_key().is_err());
    config.server.api_key = Some(String::new());
    assert!(config.server.require_api_key().is_err());
    config.server.api_key = Some("k".to_string());
    assert_eq!(config.server.require_api_key().expect("key"), "k");
}

#[test]
fn test_partition_to_job_carries_shared_settings() {
    let partition = PartitionConfig {
        code_parent: "LEGITEXT1".to_string(),
        n_neighbors: 10,
        n_components: 5,
        min_cluster_size: 4,
        min_samples: Some(2),
    };
    let job = partition.to_job(99, 0.25);
    assert_eq!(job.partition_key, "LEGITEXT1");
    assert_eq!(job.reduction.seed, 99);
    assert!((job.reduction.min_dist - 0.25).abs() < f32::EPSILON);
    assert_eq!(job.clustering.effective_min_samples(), 2);
}
