// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::settings::FirecrawlSettings;
use crate::domain::models::crawl::{CrawlJob, CrawlJobRequest, CrawlStatusReport, PageRecord};
use crate::domain::services::crawl_api::{CrawlApiClient, CrawlApiError};

/// Firecrawl v1 API 客户端
pub struct FirecrawlClient {
    client: reqwest::Client,
    base_url: Url,
}

#[derive(Deserialize, Debug)]
struct StartCrawlResponse {
    #[serde(default)]
    success: bool,
    id: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize, Debug)]
struct CrawlStatusResponse {
    status: Option<String>,
    total: Option<u64>,
    completed: Option<u64>,
    #[serde(default)]
    data: Vec<PageRecord>,
    error: Option<String>,
}

/// 只用于读取失败响应中的错误消息
#[derive(Deserialize, Debug)]
struct ErrorResponse {
    error: Option<String>,
}

impl FirecrawlClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CrawlApiError> {
        let raw = base_url.into();
        let base_url = Url::parse(raw.trim_end_matches('/'))
            .map_err(|e| CrawlApiError::InvalidBaseUrl(format!("{}: {}", raw, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CrawlApiError::InvalidBaseUrl(raw));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_settings(settings: &FirecrawlSettings) -> Result<Self, CrawlApiError> {
        Self::new(
            settings.api_url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// 在基础地址后追加路径段，每个段单独编码，`/`、`?` 不会改变请求的端点
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CrawlApiError> {
        if let Some(segment) = segments.iter().find(|s| s.is_empty() || **s == "." || **s == "..") {
            return Err(CrawlApiError::InvalidJobId(segment.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CrawlApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 从失败响应中取出错误消息，无法解析时使用原始响应体
    fn error_message(body: &str) -> String {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|r| r.error)
            .unwrap_or_else(|| body.to_string())
    }
}

#[async_trait]
impl CrawlApiClient for FirecrawlClient {
    async fn start_crawl(
        &self,
        api_key: &str,
        request: &CrawlJobRequest,
    ) -> Result<CrawlJob, CrawlApiError> {
        debug!(url = %request.url, webhook = %request.webhook, "Submitting Firecrawl crawl");

        let resp = self
            .client
            .post(self.endpoint(&["crawl"])?)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(CrawlApiError::classify(
                status.as_u16(),
                Self::error_message(&body),
            ));
        }

        let parsed: StartCrawlResponse = serde_json::from_str(&body)
            .map_err(|e| CrawlApiError::InvalidResponse(e.to_string()))?;
        debug!(response = ?parsed, "Firecrawl crawl response");

        match parsed {
            StartCrawlResponse {
                success: true,
                id: Some(id),
                ..
            } => Ok(CrawlJob { id }),
            StartCrawlResponse {
                success: true,
                id: None,
                ..
            } => Err(CrawlApiError::InvalidResponse(
                "crawl response is missing the job id".to_string(),
            )),
            StartCrawlResponse { error, .. } => Err(CrawlApiError::classify(
                status.as_u16(),
                error.unwrap_or_else(|| "unknown error".to_string()),
            )),
        }
    }

    async fn crawl_status(
        &self,
        api_key: &str,
        job_id: &str,
    ) -> Result<CrawlStatusReport, CrawlApiError> {
        let resp = self
            .client
            .get(self.endpoint(&["crawl", job_id])?)
            .bearer_auth(api_key)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(CrawlApiError::classify(
                status.as_u16(),
                Self::error_message(&body),
            ));
        }

        let parsed: CrawlStatusResponse = serde_json::from_str(&body)
            .map_err(|e| CrawlApiError::InvalidResponse(e.to_string()))?;

        let Some(crawl_status) = parsed.status else {
            return Err(CrawlApiError::classify(
                status.as_u16(),
                parsed
                    .error
                    .unwrap_or_else(|| "status response has no status field".to_string()),
            ));
        };

        Ok(CrawlStatusReport {
            status: crawl_status,
            page_urls: parsed
                .data
                .iter()
                .enumerate()
                .filter_map(|(index, page)| {
                    let url = page.metadata.page_url();
                    if url.is_none() {
                        debug!(job_id = %job_id, index, "Skipping crawled page without a URL");
                    }
                    url
                })
                .map(str::to_string)
                .collect(),
            total: parsed.total,
            completed: parsed.completed,
        })
    }
}
