// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::spawn_app;
use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// 完整流程：发起爬取 -> Webhook 推送页面 -> 轮询 -> 再次爬取清空旧记录
#[tokio::test]
async fn crawl_webhook_poll_and_recrawl() {
    let app = spawn_app().await;

    Mock::given(method("POST"))
        .and(path("/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "id": "job-1" })),
        )
        .mount(&app.firecrawl)
        .await;
    Mock::given(method("GET"))
        .and(path("/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "data": [
                { "metadata": { "url": "https://blog.example.co.uk/" } },
                { "metadata": { "url": "https://blog.example.co.uk/post" } }
            ]
        })))
        .mount(&app.firecrawl)
        .await;

    let (status, body) = app
        .post_json("/api/crawl", json!({ "url": "https://blog.example.co.uk/" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "job-1");

    // Two-label heuristic: the store key is the public suffix itself
    app.send_page_webhook("co.uk", "https://blog.example.co.uk/")
        .await;
    app.send_page_webhook("co.uk", "https://blog.example.co.uk/post")
        .await;

    let (status, body) = app
        .post_json("/api/poll/co.uk", json!({ "crawlId": "job-1" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
    assert_eq!(
        body["webhook"],
        json!(["https://blog.example.co.uk/", "https://blog.example.co.uk/post"])
    );
    assert_eq!(body["webhook"], body["polling"]);

    let contents = std::fs::read_to_string(app.store.path()).unwrap();
    let on_disk: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(on_disk["co.uk"].as_array().unwrap().len(), 2);

    // A new crawl for the same domain starts from an empty list
    let (status, _) = app
        .post_json("/api/crawl", json!({ "url": "https://shop.example.co.uk/" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .post_json("/api/poll/co.uk", json!({ "crawlId": "job-1" }))
        .await;
    assert_eq!(body["webhook"], json!([]));
}
