// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::repositories::url_store_repository::UrlStore;
use crate::domain::services::crawl_api::CrawlApiClient;
use crate::presentation::handlers::{crawl_handler, webhook_handler};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// 创建应用路由
///
/// 处理器所需的存储、客户端和配置通过 `Extension` 层注入
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes<S, C>() -> Router
where
    S: UrlStore + 'static,
    C: CrawlApiClient + 'static,
{
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version));

    let api_routes = Router::new()
        .route("/api/crawl", post(crawl_handler::start_crawl::<S, C>))
        .route(
            "/api/webhook/{domain}",
            post(webhook_handler::receive_webhook::<S>),
        )
        .route("/api/poll/{domain}", post(crawl_handler::poll_crawl::<S, C>));

    Router::new().merge(public_routes).merge(api_routes)
}

/// 创建带依赖和中间件的完整应用
pub fn app<S, C>(store: Arc<S>, client: Arc<C>, settings: Arc<Settings>) -> Router
where
    S: UrlStore + 'static,
    C: CrawlApiClient + 'static,
{
    routes::<S, C>()
        .layer(Extension(store))
        .layer(Extension(client))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
