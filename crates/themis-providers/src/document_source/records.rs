//! Article record decoding shared by the document sources
//!
//! Records look like `{"_key" | "id", "content", "num", "code_parent"}`.
//! Identifiers and titles may be strings or numbers.

use serde_json::Value;
use themis_domain::error::{Error, Result};
use themis_domain::value_objects::Document;
use tracing::warn;

use crate::utils::JsonExt;

/// Decode a JSON array of article records
///
/// Records without an identifier are skipped with a warning. A body that is
/// not an array is a source error.
pub fn parse_documents(body: &Value) -> Result<Vec<Document>> {
    let records = body
        .as_array()
        .ok_or_else(|| Error::source_fetch("Expected a JSON array of articles"))?;

    let mut documents = Vec::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        let Some(id) = record.opt_string("_key").or_else(|| record.opt_string("id")) else {
            warn!(position, "Skipping article record without an identifier");
            continue;
        };
        let mut document = Document::new(id, record.str_or("content", ""));
        if let Some(code_parent) = record.opt_string("code_parent") {
            document = document.with_partition_key(code_parent);
        }
        if let Some(num) = record.opt_string("num") {
            document = document.with_title(num);
        }
        documents.push(document);
    }
    Ok(documents)
}
