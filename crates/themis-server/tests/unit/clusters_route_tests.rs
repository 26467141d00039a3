//! POST /clusters_for_articles

use std::collections::BTreeMap;

use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::{Client, LocalResponse};
use serde_json::Value;

use crate::support::{API_KEY, client};

async fn post_clusters<'c>(client: &'c Client, body: &str) -> LocalResponse<'c> {
    client
        .post("/clusters_for_articles")
        .header(ContentType::JSON)
        .header(Header::new("x-api-key", API_KEY))
        .body(body.to_string())
        .dispatch()
        .await
}

#[rocket::async_test]
async fn test_dominant_cluster_per_article() {
    let client = client().await;
    let response = post_clusters(
        &client,
        r#"{"article_ids": ["art-defense-1", "art-defense-2", "art-fp-1", "unknown"]}"#,
    )
    .await;
    assert_eq!(response.status(), Status::Ok);

    let clusters: BTreeMap<String, i64> = response.into_json().await.expect("json body");
    assert_eq!(clusters.len(), 3);
    assert_eq!(clusters["art-defense-1"], 3);
    assert_eq!(clusters["art-defense-2"], 1);
    assert_eq!(clusters["art-fp-1"], -1);
}

#[rocket::async_test]
async fn test_no_matching_chunks_is_404() {
    let client = client().await;
    let response = post_clusters(&client, r#"{"article_ids": ["unknown"]}"#).await;
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().await.expect("json body");
    assert_eq!(body["error"], "No chunks found for this code");
}

#[rocket::async_test]
async fn test_missing_or_empty_ids_are_400() {
    let client = client().await;
    for body in [r#"{}"#, r#"{"article_ids": []}"#] {
        let response = post_clusters(&client, body).await;
        assert_eq!(response.status(), Status::BadRequest, "{body}");
    }
}
