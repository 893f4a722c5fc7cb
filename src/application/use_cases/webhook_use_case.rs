// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::{
    models::webhook::{WebhookEvent, WebhookEventType},
    repositories::url_store_repository::{StoreError, UrlStore},
};
use crate::infrastructure::metrics::WEBHOOK_EVENTS;
use metrics::counter;
use std::sync::Arc;
use tracing::{info, warn};

/// Webhook 处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// 页面 URL 已追加到存储
    Recorded(String),
    /// 非 `crawl.page` 事件
    Ignored(WebhookEventType),
    /// `crawl.page` 事件中没有可用的页面 URL
    MissingPageUrl,
}

/// Webhook 用例
///
/// 不校验域名是否对应进行中的爬取，未知域名会直接创建新条目
pub struct WebhookUseCase<S: ?Sized> {
    store: Arc<S>,
}

impl<S> WebhookUseCase<S>
where
    S: UrlStore + ?Sized + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        domain: &str,
        event: &WebhookEvent,
    ) -> Result<WebhookOutcome, StoreError> {
        counter!(WEBHOOK_EVENTS, "type" => event.event_type.to_string()).increment(1);

        if event.event_type != WebhookEventType::CrawlPage {
            return Ok(WebhookOutcome::Ignored(event.event_type));
        }

        let Some(url) = event.first_page_url() else {
            warn!(domain = %domain, "crawl.page event without a page URL");
            return Ok(WebhookOutcome::MissingPageUrl);
        };

        info!(domain = %domain, url = %url, "Page crawled");
        self.store.append_url(domain, url).await?;
        Ok(WebhookOutcome::Recorded(url.to_string()))
    }
}
