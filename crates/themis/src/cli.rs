//! Command line interface
//!
//! Every command loads the layered configuration, installs logging and
//! builds one [`AppContext`]. Results are printed to stdout as JSON; logs
//! go to stderr.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use themis_domain::constants::SEARCH_DEFAULT_LIMIT;
use themis_domain::error::{Error, Result};
use themis_domain::value_objects::ClusteringJob;
use themis_infrastructure::config::{ClusteringConfig, PartitionConfig, validate_partition_config};
use themis_infrastructure::di::list_available_providers;
use themis_infrastructure::logging::init_logging;
use themis_infrastructure::{AppContext, ConfigLoader, init_app};
use themis_server::run_server;
use tracing::info;

/// Reducer neighborhood for a code without tuned parameters
pub const AD_HOC_N_NEIGHBORS: usize = 15;
/// Reducer output dimensionality for a code without tuned parameters
pub const AD_HOC_N_COMPONENTS: usize = 30;

/// Command line interface for Themis
#[derive(Parser, Debug)]
#[command(name = "themis")]
#[command(about = "Themis - Semantic search and topic clustering over legal articles")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Serve the HTTP API, building the index first when configured
    Serve,

    /// Build the collection from the document source
    Index {
        /// Drop and rebuild even when the collection already has points
        #[arg(long)]
        force: bool,
    },

    /// Cluster chunks and write their cluster labels
    Cluster(ClusterArgs),

    /// Search the collection
    Search {
        /// Free-text query
        query: String,

        /// Number of hits
        #[arg(short, long, default_value_t = (SEARCH_DEFAULT_LIMIT as i64), allow_negative_numbers = true)]
        limit: i64,

        /// Restrict hits to one code (`code_parent`)
        #[arg(long)]
        code: Option<String>,
    },

    /// List registered embedding and vector store providers
    Providers,
}

/// Partition selection for `themis cluster`
///
/// Without `--code` every configured partition is processed. With it, one
/// partition is processed using its configured parameters, overridden by
/// whichever flags are given.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterArgs {
    /// Partition key (`code_parent`) to cluster
    #[arg(long)]
    pub code: Option<String>,

    /// Reducer neighborhood size
    #[arg(long)]
    pub n_neighbors: Option<usize>,

    /// Reducer output dimensionality
    #[arg(long)]
    pub n_components: Option<usize>,

    /// Smallest reported cluster
    #[arg(long)]
    pub min_cluster_size: Option<usize>,

    /// Core distance neighborhood
    #[arg(long)]
    pub min_samples: Option<usize>,
}

impl ClusterArgs {
    fn has_overrides(&self) -> bool {
        self.n_neighbors.is_some()
            || self.n_components.is_some()
            || self.min_cluster_size.is_some()
            || self.min_samples.is_some()
    }

    /// Jobs to run under `config`
    pub fn jobs(&self, config: &ClusteringConfig) -> Result<Vec<ClusteringJob>> {
        let Some(code) = &self.code else {
            if self.has_overrides() {
                return Err(Error::client_input(
                    "Partition parameters need --code to select the partition",
                ));
            }
            return Ok(config.jobs());
        };

        let configured = config.partitions.iter().find(|p| &p.code_parent == code);
        let mut partition = match configured {
            Some(partition) => partition.clone(),
            None => PartitionConfig {
                code_parent: code.clone(),
                n_neighbors: AD_HOC_N_NEIGHBORS,
                n_components: AD_HOC_N_COMPONENTS,
                min_cluster_size: self.min_cluster_size.ok_or_else(|| {
                    Error::client_input(format!(
                        "Code {code} has no configured partition; pass --min-cluster-size"
                    ))
                })?,
                min_samples: None,
            },
        };
        if let Some(n) = self.n_neighbors {
            partition.n_neighbors = n;
        }
        if let Some(n) = self.n_components {
            partition.n_components = n;
        }
        if let Some(n) = self.min_cluster_size {
            partition.min_cluster_size = n;
        }
        if let Some(n) = self.min_samples {
            partition.min_samples = Some(n);
        }
        validate_partition_config(&partition)?;
        Ok(vec![partition.to_job(config.seed, config.min_dist)])
    }
}

/// Load configuration, install logging and run the command
pub async fn run(cli: Cli) -> Result<()> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;
    init_logging(&config.logging)?;

    let context = init_app(config).await?;
    if let Some(output) = execute(&cli.command, &context).await? {
        println!("{output}");
    }
    Ok(())
}

/// Run one command against an initialized context
///
/// Returns the text to print, if any. `Serve` only returns once the
/// server has shut down.
pub async fn execute(command: &Command, context: &AppContext) -> Result<Option<String>> {
    match command {
        Command::Serve => {
            if context.config.indexing.on_startup {
                let report = context.ensure_index().await?;
                info!(
                    collection = %report.collection,
                    points = report.points_written,
                    skipped = report.skipped,
                    "Startup indexing finished"
                );
            }
            run_server(context).await?;
            Ok(None)
        }
        Command::Index { force } => {
            let report = if *force {
                context.rebuild_index().await?
            } else {
                context.ensure_index().await?
            };
            Ok(Some(serde_json::to_string_pretty(&report)?))
        }
        Command::Cluster(args) => {
            let jobs = args.jobs(&context.config.clustering)?;
            let reports = if args.code.is_some() {
                let mut reports = Vec::with_capacity(jobs.len());
                for job in &jobs {
                    reports.push(context.clustering_pipeline().cluster(job).await?);
                }
                reports
            } else {
                context.clustering_pipeline().cluster_all(&jobs).await
            };
            Ok(Some(serde_json::to_string_pretty(&reports)?))
        }
        Command::Search { query, limit, code } => {
            let hits = context
                .search_service()
                .search(query, *limit, code.as_deref())
                .await?;
            Ok(Some(serde_json::to_string_pretty(&hits)?))
        }
        Command::Providers => Ok(Some(list_available_providers().to_string())),
    }
}
