use actix_web::http::StatusCode;
use leadmind::{
    dal::{config_db, KvStore},
    domain::{LeadCount, SearchRequest},
    services::{WebhookClient, NETWORK_ERROR_MESSAGE},
};
use serde_json::json;

use crate::helpers::{spawn_app, spawn_app_with_store, spawn_mock_server, CannedProvider};

fn payload() -> SearchRequest {
    SearchRequest::parse(
        "bakeries",
        "Paris",
        Some("food"),
        LeadCount::parse(50).unwrap(),
        None,
    )
    .unwrap()
}

#[tokio::test]
async fn deliver_to_ok_endpoint_succeeds_with_json_body() {
    let hook = spawn_mock_server(StatusCode::OK, "".to_string());

    let result = WebhookClient::new()
        .deliver(&payload(), &format!("{}/hook", hook.url))
        .await;

    assert!(result.success);
    assert_eq!(result.message, "Data sent successfully");

    let requests = hook.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].header("content-type"), Some("application/json"));
    assert_eq!(
        requests[0].body,
        json!({"searchQuery": "bakeries", "location": "Paris", "category": "food", "leadCount": 50})
    );
}

#[tokio::test]
async fn deliver_to_failing_endpoint_reports_status_and_body() {
    let hook = spawn_mock_server(StatusCode::INTERNAL_SERVER_ERROR, "oops".to_string());

    let result = WebhookClient::new().deliver(&payload(), &hook.url).await;

    assert!(!result.success);
    assert!(result.message.contains("500"));
    assert!(result.message.contains("oops"));
    assert_eq!(
        result.message,
        "Webhook failed: 500 Internal Server Error. oops"
    );
}

#[tokio::test]
async fn deliver_to_unreachable_host_is_a_network_error() {
    let result = WebhookClient::new()
        .deliver(&payload(), "http://127.0.0.1:1/hook")
        .await;

    assert!(!result.success);
    assert_eq!(result.message, NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn saved_webhook_survives_a_restart() {
    let app = spawn_app(CannedProvider::new("[]")).await;

    let page = app.set_webhook("https://n8n.example.com/webhook/abc").await;
    assert!(page.contains("Webhook URL saved successfully!"));

    let stored = config_db::get_webhook_url(&KvStore::new(&app.store_path))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.as_ref(), "https://n8n.example.com/webhook/abc");

    let restarted =
        spawn_app_with_store(CannedProvider::new("[]"), app.store_path.clone()).await;
    assert!(restarted.page().await.contains("n8n.example.com"));
}

#[tokio::test]
async fn invalid_webhook_url_is_not_persisted() {
    let app = spawn_app(CannedProvider::new("[]")).await;

    let page = app.set_webhook("not a url").await;

    assert!(page.contains("Please enter a valid URL."));
    assert!(page.contains("notification warning"));
    assert!(!app.store_path.exists());
}

#[tokio::test]
async fn send_requires_webhook_and_generated_form() {
    let provider = CannedProvider::new("[]");
    let app = spawn_app(provider).await;

    let page = app.send_to_webhook().await;
    assert!(page.contains("Webhook URL is not set. Please set it first."));

    let hook = spawn_mock_server(StatusCode::OK, "".to_string());
    app.set_webhook(&hook.url).await;
    let page = app.send_to_webhook().await;
    assert!(page.contains("Please fill out the form and generate leads first."));

    assert!(hook.requests().is_empty());
}

#[tokio::test]
async fn send_forwards_last_search_to_webhook() {
    let app = spawn_app(CannedProvider::new("[]")).await;
    let hook = spawn_mock_server(StatusCode::OK, "".to_string());

    app.set_webhook(&hook.url).await;
    app.generate(&[
        ("search_query", "bakeries"),
        ("location", "Paris"),
        ("lead_count", "unlimited"),
    ])
    .await;
    let page = app.send_to_webhook().await;

    assert!(page.contains("Form data sent to webhook successfully!"));
    let requests = hook.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body,
        json!({"searchQuery": "bakeries", "location": "Paris", "category": "", "leadCount": 200})
    );
}

#[tokio::test]
async fn failed_send_shows_webhook_error() {
    let app = spawn_app(CannedProvider::new("[]")).await;
    let hook = spawn_mock_server(StatusCode::INTERNAL_SERVER_ERROR, "oops".to_string());

    app.set_webhook(&hook.url).await;
    app.generate(&[("search_query", "bakeries"), ("location", "Paris")])
        .await;
    let page = app.send_to_webhook().await;

    assert!(page.contains("500 Internal Server Error"));
    assert!(page.contains("oops"));
    assert!(page.contains("notification error"));
}
