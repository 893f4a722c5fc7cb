// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::{CrawlJob, CrawlJobRequest, CrawlStatusReport};
use async_trait::async_trait;
use thiserror::Error;

/// 上游鉴权失败时错误消息中出现的片段
pub const INVALID_TOKEN_MARKER: &str = "Invalid token";

/// 外部爬取 API 错误
#[derive(Error, Debug)]
pub enum CrawlApiError {
    /// API 密钥无效或缺失
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 上游返回失败
    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },
    /// 网络请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 响应内容无法识别
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// API 基础地址无法作为请求前缀
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    /// 任务 ID 无法作为单个路径段
    #[error("Invalid crawl job id: {0:?}")]
    InvalidJobId(String),
}

impl CrawlApiError {
    /// 根据上游的 HTTP 状态和错误消息分类
    ///
    /// 401 视为鉴权失败；Firecrawl 的错误消息包含 "Invalid token" 时同样视为鉴权失败
    pub fn classify(status: u16, message: String) -> Self {
        if status == 401 || message.contains(INVALID_TOKEN_MARKER) {
            CrawlApiError::Unauthorized(message)
        } else {
            CrawlApiError::Upstream { status, message }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CrawlApiError::Unauthorized(_))
    }
}

/// 外部爬取 API 特质
#[async_trait]
pub trait CrawlApiClient: Send + Sync {
    /// 提交异步爬取任务，返回外部任务 ID
    async fn start_crawl(
        &self,
        api_key: &str,
        request: &CrawlJobRequest,
    ) -> Result<CrawlJob, CrawlApiError>;

    /// 查询爬取任务状态
    async fn crawl_status(
        &self,
        api_key: &str,
        job_id: &str,
    ) -> Result<CrawlStatusReport, CrawlApiError>;
}
