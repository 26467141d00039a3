//! POST /search

use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::{Client, LocalResponse};
use serde_json::Value;

use crate::support::{API_KEY, CODE_DEFENSE, CODE_FONCTION_PUBLIQUE, client};

async fn post_search<'c>(client: &'c Client, body: &str) -> LocalResponse<'c> {
    client
        .post("/search")
        .header(ContentType::JSON)
        .header(Header::new("x-api-key", API_KEY))
        .body(body.to_string())
        .dispatch()
        .await
}

#[rocket::async_test]
async fn test_search_returns_public_fields() {
    let client = client().await;
    let response = post_search(
        &client,
        r#"{"query": "Le fonctionnaire bénéficie d'une protection fonctionnelle.", "limit": 1}"#,
    )
    .await;
    assert_eq!(response.status(), Status::Ok);

    let hits: Vec<Value> = response.into_json().await.expect("json body");
    assert_eq!(hits.len(), 1);
    let hit = &hits[0];
    assert_eq!(hit["id"], "art-fp-1");
    assert_eq!(hit["num"], "L134-1");
    assert_eq!(hit["code_parent"], CODE_FONCTION_PUBLIQUE);
    assert!(hit["score"].is_number());
    assert!(hit["highlight"].as_str().unwrap_or_default().contains("protection"));
}

#[rocket::async_test]
async fn test_default_limit_and_order() {
    let client = client().await;
    let response = post_search(&client, r#"{"query": "alinéa discipline sanctions"}"#).await;
    assert_eq!(response.status(), Status::Ok);

    let hits: Vec<Value> = response.into_json().await.expect("json body");
    assert_eq!(hits.len(), 4);
    let scores: Vec<f64> = hits
        .iter()
        .map(|h| h["score"].as_f64().unwrap_or(f64::NAN))
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[rocket::async_test]
async fn test_code_filter() {
    let client = client().await;
    let body = format!(r#"{{"query": "protection", "code_id": "{CODE_DEFENSE}"}}"#);
    let response = post_search(&client, &body).await;
    assert_eq!(response.status(), Status::Ok);

    let hits: Vec<Value> = response.into_json().await.expect("json body");
    assert_eq!(hits.len(), 3);
    assert!(hits.iter().all(|h| h["code_parent"] == CODE_DEFENSE));
}

#[rocket::async_test]
async fn test_invalid_requests_are_400() {
    let client = client().await;
    for body in [
        r#"{}"#,
        r#"{"query": ""}"#,
        r#"{"query": "   "}"#,
        r#"{"query": "discipline", "limit": 0}"#,
        r#"{"query": "discipline", "limit": -3}"#,
    ] {
        let response = post_search(&client, body).await;
        assert_eq!(response.status(), Status::BadRequest, "{body}");
        let error: Value = response.into_json().await.expect("json body");
        assert!(error["error"].is_string(), "{body}");
    }
}

#[rocket::async_test]
async fn test_malformed_json_is_json_error() {
    let client = client().await;
    let response = post_search(&client, "{not json").await;
    assert_eq!(response.status(), Status::BadRequest);
    let error: Value = response.into_json().await.expect("json body");
    assert!(error["error"].is_string());
}

#[rocket::async_test]
async fn test_wrong_field_type_is_400() {
    let client = client().await;
    for body in [
        r#"{"query": "discipline", "limit": "ten"}"#,
        r#"{"query": 42}"#,
        r#"{"query": "discipline", "code_id": ["a"]}"#,
    ] {
        let response = post_search(&client, body).await;
        assert_eq!(response.status(), Status::BadRequest, "{body}");
        let error: Value = response.into_json().await.expect("json body");
        assert!(error["error"].is_string(), "{body}");
    }
}

#[rocket::async_test]
async fn test_limit_beyond_corpus_returns_every_chunk() {
    let client = client().await;
    for limit in ["100", "1099511627776", "9223372036854775807"] {
        let body = format!(r#"{{"query": "discipline", "limit": {limit}}}"#);
        let response = post_search(&client, &body).await;
        assert_eq!(response.status(), Status::Ok, "limit {limit}");
        let hits: Vec<Value> = response.into_json().await.expect("json body");
        assert_eq!(hits.len(), 4, "limit {limit}");
    }
}
