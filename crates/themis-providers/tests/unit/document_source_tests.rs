//! Tests for the JSON file document source

use std::io::Write;

use themis_domain::error::Error;
use themis_domain::ports::providers::DocumentSource;
use themis_providers::document_source::JsonFileDocumentSource;

#[tokio::test]
async fn test_file_source_reads_recorded_articles() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"[
            {{"_key": "LEGIARTI000006558725", "content": "Le militaire a droit au respect.", "num": "L4121-1", "code_parent": "LEGITEXT000006071307"}},
            {{"_key": "LEGIARTI000044419532", "content": "", "num": "L111-1", "code_parent": "LEGITEXT000044416551"}}
        ]"#
    )
    .expect("write");

    let source = JsonFileDocumentSource::new(file.path());
    let documents = source.fetch_all().await.expect("fetch");

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].title.as_deref(), Some("L4121-1"));
    assert!(documents[0].has_content());
    assert!(!documents[1].has_content());
    assert!(source.describe().starts_with("file "));
}

#[tokio::test]
async fn test_missing_file_is_source_fetch_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = JsonFileDocumentSource::new(dir.path().join("absent.json"));
    let err = source.fetch_all().await.err();
    assert!(matches!(err, Some(Error::SourceFetch { .. })));
}

#[tokio::test]
async fn test_malformed_file_is_source_fetch_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "not json").expect("write");
    let err = JsonFileDocumentSource::new(file.path()).fetch_all().await.err();
    assert!(matches!(err, Some(Error::SourceFetch { .. })));
}
