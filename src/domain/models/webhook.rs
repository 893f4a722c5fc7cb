// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::PageRecord;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Firecrawl Webhook 事件类型
///
/// 只有 `crawl.page` 会修改存储，其余类型只做确认
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum WebhookEventType {
    #[serde(rename = "crawl.started")]
    CrawlStarted,
    #[serde(rename = "crawl.page")]
    CrawlPage,
    #[serde(rename = "crawl.completed")]
    CrawlCompleted,
    #[serde(rename = "crawl.failed")]
    CrawlFailed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for WebhookEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WebhookEventType::CrawlStarted => "crawl.started",
            WebhookEventType::CrawlPage => "crawl.page",
            WebhookEventType::CrawlCompleted => "crawl.completed",
            WebhookEventType::CrawlFailed => "crawl.failed",
            WebhookEventType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Firecrawl 推送的 Webhook 事件
///
/// 通过 [`WebhookEvent::from_slice`] 宽松解析，任何请求体都能得到一个事件
#[derive(Debug, Clone, Default)]
pub struct WebhookEvent {
    pub event_type: WebhookEventType,
    /// 爬取任务 ID
    pub id: Option<String>,
    pub data: Vec<PageRecord>,
    /// 上游附带的错误信息，非字符串时保留其 JSON 文本
    pub error: Option<String>,
}

impl WebhookEvent {
    /// 从原始请求体解析，非 JSON 时得到 `Unknown` 空事件
    pub fn from_slice(body: &[u8]) -> Self {
        serde_json::from_slice::<Value>(body)
            .map(|value| Self::from_value(&value))
            .unwrap_or_default()
    }

    /// 逐字段解析，字段类型不符时取默认值
    pub fn from_value(value: &Value) -> Self {
        let event_type = value
            .get("type")
            .and_then(Value::as_str)
            .and_then(|t| serde_json::from_value(Value::String(t.to_string())).ok())
            .unwrap_or_default();

        let id = value.get("id").and_then(Value::as_str).map(str::to_string);

        // Malformed entries keep their position so data[0] stays the first page
        let data = value
            .get("data")
            .and_then(Value::as_array)
            .map(|pages| {
                pages
                    .iter()
                    .map(|page| PageRecord::deserialize(page).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();

        let error = match value.get("error") {
            None | Some(Value::Null) => None,
            Some(Value::String(message)) => Some(message.clone()),
            Some(other) => Some(other.to_string()),
        };

        Self {
            event_type,
            id,
            data,
            error,
        }
    }

    /// `crawl.page` 事件中第一个页面的 URL
    pub fn first_page_url(&self) -> Option<&str> {
        self.data.first().and_then(|page| page.metadata.page_url())
    }
}
