// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 爬取时排除的 HTML 标签
pub const EXCLUDED_TAGS: [&str; 8] = [
    "img", "iframe", "input", "button", "script", "style", "noscript", "svg",
];

/// 外部爬取任务
///
/// 任务 ID 由 Firecrawl 生成，本地不持久化，客户端轮询时回传
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlJob {
    pub id: String,
}

/// 提交给 Firecrawl 的爬取请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlJobRequest {
    /// 起始 URL
    pub url: String,
    /// 回调地址
    pub webhook: String,
    pub allow_external_links: bool,
    pub limit: u32,
    pub scrape_options: ScrapeOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOptions {
    pub exclude_tags: Vec<String>,
}

impl CrawlJobRequest {
    /// 使用固定的排除标签构建请求
    pub fn new(url: String, webhook: String, limit: u32, allow_external_links: bool) -> Self {
        Self {
            url,
            webhook,
            allow_external_links,
            limit,
            scrape_options: ScrapeOptions {
                exclude_tags: EXCLUDED_TAGS.iter().map(|t| t.to_string()).collect(),
            },
        }
    }
}

/// Firecrawl 报告的爬取状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlStatusReport {
    /// 外部状态字符串，例如 `scraping`、`completed`
    pub status: String,
    /// 已爬取页面的 URL，保持上游顺序
    pub page_urls: Vec<String>,
    pub total: Option<u64>,
    pub completed: Option<u64>,
}

/// 上游返回的单个页面记录，Webhook 事件和状态查询共用
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRecord {
    #[serde(default)]
    pub metadata: PageMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMetadata {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "sourceURL", default)]
    pub source_url: Option<String>,
}

impl PageMetadata {
    /// 页面 URL，缺少 `url` 时回退到 `sourceURL`
    pub fn page_url(&self) -> Option<&str> {
        self.url.as_deref().or(self.source_url.as_deref())
    }
}
