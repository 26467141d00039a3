//! Index, search and cluster through the CLI commands
//!
//! Uses the null model loader and the memory store over a JSON file.

use std::io::Write;

use serde_json::Value;
use tempfile::NamedTempFile;
use themis::cli::{ClusterArgs, Command, execute};
use themis::domain::Error;
use themis::infrastructure::config::SourceKind;
use themis::{AppConfig, AppContext, init_app};

const CODE_DEFENSE: &str = "LEGITEXT000006071307";
const CODE_FONCTION_PUBLIQUE: &str = "LEGITEXT000044416551";

fn long_article() -> String {
    let sentence = "Le militaire en activité peut faire l'objet de sanctions. ";
    sentence.repeat(50).chars().take(2600).collect()
}

fn articles_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("temp file");
    let body = serde_json::json!([
        {
            "_key": "doc1",
            "content": long_article(),
            "num": "L4137-2",
            "code_parent": CODE_DEFENSE
        },
        {
            "_key": "doc2",
            "content": "Le fonctionnaire bénéficie d'une protection fonctionnelle.",
            "num": "L134-1",
            "code_parent": CODE_FONCTION_PUBLIQUE
        }
    ]);
    file.write_all(body.to_string().as_bytes()).expect("write");
    file
}

async fn context(source: &NamedTempFile) -> AppContext {
    let mut config = AppConfig::default();
    config.embedding.provider = "null".to_string();
    config.vector_store.provider = "memory".to_string();
    config.source.kind = SourceKind::File;
    config.source.path = Some(source.path().to_path_buf());
    init_app(config).await.expect("init")
}

async fn run_json(command: Command, context: &AppContext) -> Value {
    let output = execute(&command, context)
        .await
        .expect("command")
        .expect("output");
    serde_json::from_str(&output).expect("json output")
}

#[tokio::test]
async fn test_index_chunks_every_article() {
    let source = articles_file();
    let context = context(&source).await;

    let report = run_json(Command::Index { force: false }, &context).await;
    assert_eq!(report["documents_fetched"], 2);
    assert_eq!(report["chunks_created"], 5);
    assert_eq!(report["points_written"], 5);
    assert_eq!(report["skipped"], false);

    let again = run_json(Command::Index { force: false }, &context).await;
    assert_eq!(again["skipped"], true);

    let forced = run_json(Command::Index { force: true }, &context).await;
    assert_eq!(forced["points_written"], 5);
    assert_eq!(
        context
            .vector_store()
            .count(context.collection())
            .await
            .expect("count"),
        Some(5)
    );
}

#[tokio::test]
async fn test_search_prints_public_hits() {
    let source = articles_file();
    let context = context(&source).await;
    execute(&Command::Index { force: false }, &context)
        .await
        .expect("index");

    let hits = run_json(
        Command::Search {
            query: "protection fonctionnelle du fonctionnaire".to_string(),
            limit: 1,
            code: None,
        },
        &context,
    )
    .await;
    let hits = hits.as_array().expect("array");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], "doc2");
    assert_eq!(hits[0]["num"], "L134-1");
    assert_eq!(hits[0]["code_parent"], CODE_FONCTION_PUBLIQUE);

    let filtered = run_json(
        Command::Search {
            query: "protection fonctionnelle du fonctionnaire".to_string(),
            limit: 10,
            code: Some(CODE_DEFENSE.to_string()),
        },
        &context,
    )
    .await;
    let filtered = filtered.as_array().expect("array");
    assert_eq!(filtered.len(), 4);
    assert!(filtered.iter().all(|hit| hit["id"] == "doc1"));
}

#[tokio::test]
async fn test_search_rejects_bad_input() {
    let source = articles_file();
    let context = context(&source).await;
    let err = execute(
        &Command::Search {
            query: "sanctions".to_string(),
            limit: 0,
            code: None,
        },
        &context,
    )
    .await
    .err();
    assert!(matches!(err, Some(Error::ClientInput { .. })));
}

#[tokio::test]
async fn test_cluster_empty_partition_reports_nothing() {
    let source = articles_file();
    let context = context(&source).await;
    execute(&Command::Index { force: false }, &context)
        .await
        .expect("index");

    let reports = run_json(
        Command::Cluster(ClusterArgs {
            code: Some("LEGITEXT000000000001".to_string()),
            min_cluster_size: Some(5),
            ..ClusterArgs::default()
        }),
        &context,
    )
    .await;
    let reports = reports.as_array().expect("array");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["partition_key"], "LEGITEXT000000000001");
    assert_eq!(reports[0]["points"], 0);
}

#[tokio::test]
async fn test_providers_lists_registered_names() {
    let source = articles_file();
    let context = context(&source).await;
    let output = execute(&Command::Providers, &context)
        .await
        .expect("providers")
        .expect("output");
    assert!(output.contains("fastembed"));
    assert!(output.contains("qdrant"));
}
