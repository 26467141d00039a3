//! API key guard and unauthenticated routes

use rocket::http::{ContentType, Header, Status};
use serde_json::Value;
use themis_server::models::HealthResponse;

use crate::support::{API_KEY, client};

#[rocket::async_test]
async fn test_missing_key_is_forbidden() {
    let client = client().await;
    let response = client
        .post("/search")
        .header(ContentType::JSON)
        .body(r#"{"query": "discipline"}"#)
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Forbidden);
    let body: Value = response.into_json().await.expect("json body");
    assert!(body["error"].is_string());
}

#[rocket::async_test]
async fn test_wrong_key_is_forbidden() {
    let client = client().await;
    let response = client
        .post("/clusters_for_articles")
        .header(ContentType::JSON)
        .header(Header::new("x-api-key", "not-the-key"))
        .body(r#"{"article_ids": ["art-defense-1"]}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Forbidden);
}

#[rocket::async_test]
async fn test_header_name_is_case_insensitive() {
    let client = client().await;
    let response = client
        .post("/search")
        .header(ContentType::JSON)
        .header(Header::new("X-API-KEY", API_KEY))
        .body(r#"{"query": "discipline"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
}

#[rocket::async_test]
async fn test_health_needs_no_key() {
    let client = client().await;
    let response = client.get("/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let health: HealthResponse = response.into_json().await.expect("json body");
    assert_eq!(health.status, "ok");
    assert_eq!(health.collection, "articles_chunked");
    assert_eq!(health.points, Some(4));
}

#[rocket::async_test]
async fn test_unknown_route_is_json_404() {
    let client = client().await;
    let response = client.get("/articles").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().await.expect("json body");
    assert!(body["error"].as_str().unwrap_or_default().contains("/articles"));
}
