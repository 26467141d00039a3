//! Argument parsing and partition selection

use clap::{CommandFactory, Parser};
use themis::cli::{AD_HOC_N_COMPONENTS, AD_HOC_N_NEIGHBORS, Cli, ClusterArgs, Command};
use themis::domain::Error;
use themis::infrastructure::config::ClusteringConfig;

const CODE_DEFENSE: &str = "LEGITEXT000006071307";

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_global_config_flag_after_subcommand() {
    let cli = Cli::try_parse_from(["themis", "index", "--force", "--config", "custom.toml"])
        .expect("parse");
    assert_eq!(cli.command, Command::Index { force: true });
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("custom.toml"))
    );
}

#[test]
fn test_search_defaults() {
    let cli = Cli::try_parse_from(["themis", "search", "sanctions disciplinaires"]).expect("parse");
    assert_eq!(
        cli.command,
        Command::Search {
            query: "sanctions disciplinaires".to_string(),
            limit: 10,
            code: None,
        }
    );
}

#[test]
fn test_search_accepts_negative_limit_for_later_validation() {
    let cli = Cli::try_parse_from(["themis", "search", "q", "--limit", "-3", "--code", CODE_DEFENSE])
        .expect("parse");
    match cli.command {
        Command::Search { limit, code, .. } => {
            assert_eq!(limit, -3);
            assert_eq!(code.as_deref(), Some(CODE_DEFENSE));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["themis"]).is_err());
}

#[test]
fn test_cluster_without_code_runs_configured_partitions() {
    let config = ClusteringConfig::default();
    let jobs = ClusterArgs::default().jobs(&config).expect("jobs");
    assert_eq!(jobs, config.jobs());
    assert_eq!(jobs.len(), 2);
}

#[test]
fn test_cluster_overrides_need_code() {
    let args = ClusterArgs {
        min_cluster_size: Some(20),
        ..ClusterArgs::default()
    };
    let err = args.jobs(&ClusteringConfig::default()).err();
    assert!(matches!(err, Some(Error::ClientInput { .. })));
}

#[test]
fn test_cluster_configured_code_with_override() {
    let args = ClusterArgs {
        code: Some(CODE_DEFENSE.to_string()),
        min_samples: Some(5),
        ..ClusterArgs::default()
    };
    let jobs = args.jobs(&ClusteringConfig::default()).expect("jobs");
    assert_eq!(jobs.len(), 1);
    let job = &jobs[0];
    assert_eq!(job.partition_key, CODE_DEFENSE);
    assert_eq!(job.reduction.n_neighbors, 15);
    assert_eq!(job.reduction.n_components, 30);
    assert_eq!(job.reduction.seed, 42);
    assert_eq!(job.clustering.min_cluster_size, 82);
    assert_eq!(job.clustering.min_samples, Some(5));
}

#[test]
fn test_cluster_unconfigured_code() {
    let config = ClusteringConfig::default();
    let missing_size = ClusterArgs {
        code: Some("LEGITEXT000000000001".to_string()),
        ..ClusterArgs::default()
    };
    assert!(matches!(
        missing_size.jobs(&config).err(),
        Some(Error::ClientInput { .. })
    ));

    let args = ClusterArgs {
        code: Some("LEGITEXT000000000001".to_string()),
        min_cluster_size: Some(10),
        ..ClusterArgs::default()
    };
    let jobs = args.jobs(&config).expect("jobs");
    assert_eq!(jobs[0].reduction.n_neighbors, AD_HOC_N_NEIGHBORS);
    assert_eq!(jobs[0].reduction.n_components, AD_HOC_N_COMPONENTS);
    assert_eq!(jobs[0].clustering.min_samples, None);
}

#[test]
fn test_cluster_invalid_override_is_configuration_error() {
    let args = ClusterArgs {
        code: Some(CODE_DEFENSE.to_string()),
        n_neighbors: Some(1),
        ..ClusterArgs::default()
    };
    let err = args.jobs(&ClusteringConfig::default()).err();
    assert!(matches!(err, Some(Error::Configuration { .. })));
}
