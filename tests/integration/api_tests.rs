// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{configured_settings, spawn_app, spawn_app_with, TEST_API_KEY};
use axum::http::StatusCode;
use crawlrelay::config::settings::Settings;
use crawlrelay::domain::repositories::url_store_repository::UrlStore;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn health_and_version() {
    let app = spawn_app().await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (status, body) = app.get("/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn crawl_submits_job_and_resets_domain() {
    let app = spawn_app().await;
    app.store
        .append_url("example.com", "https://example.com/old")
        .await
        .unwrap();

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
        .and(body_json(json!({
            "url": "https://www.example.com/docs",
            "webhook": "https://relay.test/api/webhook/example.com",
            "allowExternalLinks": false,
            "limit": 49,
            "scrapeOptions": {
                "excludeTags": ["img", "iframe", "input", "button", "script", "style", "noscript", "svg"]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "id": "job-123",
            "url": "https://api.firecrawl.dev/v1/crawl/job-123"
        })))
        .expect(1)
        .mount(&app.firecrawl)
        .await;

    let (status, body) = app
        .post_json("/api/crawl", json!({ "url": "https://www.example.com/docs" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "id": "job-123" }));
    assert!(app.store.get("example.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn crawl_with_invalid_token_returns_401() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "error": "Unauthorized: Invalid token"
        })))
        .mount(&app.firecrawl)
        .await;

    let (status, body) = app
        .post_json("/api/crawl", json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn crawl_invalid_token_message_with_other_status_returns_401() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Invalid token"
        })))
        .mount(&app.firecrawl)
        .await;

    let (status, body) = app
        .post_json("/api/crawl", json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized" }));
}

#[tokio::test]
async fn crawl_upstream_failure_hides_details() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(402).set_body_json(json!({
            "success": false,
            "error": "Insufficient credits to perform this request."
        })))
        .mount(&app.firecrawl)
        .await;

    let (status, body) = app
        .post_json("/api/crawl", json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
}

#[tokio::test]
async fn crawl_without_configuration_fails_without_side_effects() {
    let firecrawl = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&firecrawl)
        .await;

    let mut settings: Settings = configured_settings(&firecrawl.uri());
    settings.webhook.public_base_url = None;
    let app = spawn_app_with(firecrawl, settings).await;

    let (status, body) = app
        .post_json("/api/crawl", json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "SERVER_URL is not set" }));

    let stored = app.store.load().await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn crawl_without_api_key_fails() {
    let firecrawl = MockServer::start().await;
    let mut settings = configured_settings(&firecrawl.uri());
    settings.firecrawl.api_key = None;
    let app = spawn_app_with(firecrawl, settings).await;

    let (status, body) = app
        .post_json("/api/crawl", json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "FIRECRAWL_API_KEY is not set" }));
}

#[tokio::test]
async fn crawl_with_relative_url_is_rejected() {
    let app = spawn_app().await;

    let (status, body) = app.post_json("/api/crawl", json!({ "url": "example.com" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Validation failed"));
}

#[tokio::test]
async fn webhook_always_acknowledges() {
    let app = spawn_app().await;

    let (status, body) = app
        .post_json(
            "/api/webhook/example.com",
            json!({ "success": true, "type": "crawl.started", "id": "job-1", "data": [] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Webhook received" }));

    let (status, body) = app
        .post_json("/api/webhook/example.com", json!({ "type": "crawl.page", "data": [] }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Webhook received" }));

    assert!(app.store.get("example.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn webhook_pages_are_stored_in_arrival_order() {
    let app = spawn_app().await;

    let urls = [
        "https://example.com/",
        "https://example.com/pricing",
        "https://docs.example.com/intro",
    ];
    for url in urls {
        let (status, _) = app.send_page_webhook("example.com", url).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = app
        .post_json(
            "/api/webhook/example.com",
            json!({ "success": true, "type": "crawl.completed", "id": "job-1", "data": [] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.store.get("example.com").await.unwrap(), urls.to_vec());
}

#[tokio::test]
async fn webhook_acknowledges_malformed_payloads() {
    let app = spawn_app().await;
    let ack = json!({ "message": "Webhook received" });

    let payloads = [
        json!({ "type": "crawl.completed", "data": null }),
        json!({ "type": "crawl.failed", "data": [], "error": { "code": 1 } }),
        json!({ "type": 7 }),
        json!(["not", "an", "object"]),
    ];
    for payload in payloads {
        let (status, body) = app.post_json("/api/webhook/example.com", payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, ack);
    }

    let (status, body) = app.post_raw("/api/webhook/example.com", "not json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ack);

    let (status, body) = app.post_raw("/api/webhook/example.com", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ack);

    assert!(app.store.get("example.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn webhook_page_with_malformed_extra_entries_records_first_url() {
    let app = spawn_app().await;

    let (status, _) = app
        .post_json(
            "/api/webhook/example.com",
            json!({
                "type": "crawl.page",
                "data": [
                    { "metadata": { "url": "https://example.com/a" } },
                    { "metadata": null }
                ]
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        app.store.get("example.com").await.unwrap(),
        vec!["https://example.com/a"]
    );
}

#[tokio::test]
async fn crawl_with_unreadable_store_returns_500() {
    let app = spawn_app().await;
    std::fs::write(app.store.path(), "not json").unwrap();

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.firecrawl)
        .await;

    let (status, body) = app
        .post_json("/api/crawl", json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Error clearing store" }));
}

#[tokio::test]
async fn poll_with_unreadable_store_returns_500() {
    let app = spawn_app().await;
    std::fs::write(app.store.path(), "not json").unwrap();

    let (status, body) = app
        .post_json("/api/poll/example.com", json!({ "crawlId": "job-1" }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Error reading store" }));
}

#[tokio::test]
async fn poll_with_dot_segment_crawl_id_is_rejected() {
    let app = spawn_app().await;

    let (status, body) = app
        .post_json("/api/poll/example.com", json!({ "crawlId": ".." }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Validation failed"));
}

#[tokio::test]
async fn poll_returns_webhook_and_polling_views() {
    let app = spawn_app().await;
    app.send_page_webhook("example.com", "https://example.com/a").await;
    app.send_page_webhook("example.com", "https://example.com/a").await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-123"))
        .and(header("authorization", format!("Bearer {}", TEST_API_KEY).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "scraping",
            "total": 10,
            "completed": 2,
            "creditsUsed": 2,
            "data": [
                { "markdown": "a", "metadata": { "url": "https://example.com/b" } },
                { "markdown": "b", "metadata": { "sourceURL": "https://example.com/c" } }
            ]
        })))
        .mount(&app.firecrawl)
        .await;

    let (status, body) = app
        .post_json("/api/poll/example.com", json!({ "crawlId": "job-123" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "scraping",
            "webhook": ["https://example.com/a", "https://example.com/a"],
            "polling": ["https://example.com/b", "https://example.com/c"],
            "total": 10,
            "completed": 2
        })
    );
}

#[tokio::test]
async fn poll_unknown_domain_returns_empty_webhook_list() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "data": []
        })))
        .mount(&app.firecrawl)
        .await;

    let (status, body) = app
        .post_json("/api/poll/nothing.org", json!({ "crawlId": "job-9" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "status": "completed", "webhook": [], "polling": [] })
    );
}

#[tokio::test]
async fn poll_upstream_failure_is_structured() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/crawl/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": "Crawl job not found"
        })))
        .mount(&app.firecrawl)
        .await;

    let (status, body) = app
        .post_json("/api/poll/example.com", json!({ "crawlId": "missing" }))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "Failed to fetch crawl status" }));
}

#[tokio::test]
async fn poll_with_invalid_token_returns_401() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/crawl/job-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "error": "Unauthorized: Invalid token"
        })))
        .mount(&app.firecrawl)
        .await;

    let (status, body) = app
        .post_json("/api/poll/example.com", json!({ "crawlId": "job-1" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized" }));
}
