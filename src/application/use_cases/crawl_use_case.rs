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

use crate::{
    application::dto::{
        crawl_request::CrawlRequestDto,
        poll_request::{PollRequestDto, PollResponseDto},
    },
    config::settings::{Settings, FIRECRAWL_API_KEY_ENV, SERVER_URL_ENV},
    domain::{
        models::crawl::{CrawlJob, CrawlJobRequest},
        repositories::url_store_repository::{StoreError, UrlStore},
        services::crawl_api::{CrawlApiClient, CrawlApiError},
    },
    infrastructure::metrics::{CRAWLS_STARTED, CRAWL_FAILURES, POLLS},
    utils::url_utils::{top_level_domain, webhook_url, DomainError},
};
use metrics::counter;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use validator::Validate;

#[derive(Error, Debug)]
pub enum CrawlUseCaseError {
    #[error("{0} is not set")]
    MissingConfig(&'static str),
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error(transparent)]
    InvalidUrl(#[from] DomainError),
    #[error("Failed to reset store: {0}")]
    StoreReset(#[source] StoreError),
    #[error("Failed to read store: {0}")]
    StoreRead(#[source] StoreError),
    #[error("Crawl request rejected: {0}")]
    CrawlRejected(#[source] CrawlApiError),
    #[error("Crawl status unavailable: {0}")]
    StatusUnavailable(#[source] CrawlApiError),
}

impl CrawlUseCaseError {
    /// 上游是否因 API 密钥无效而拒绝
    pub fn is_unauthorized(&self) -> bool {
        match self {
            CrawlUseCaseError::CrawlRejected(e) | CrawlUseCaseError::StatusUnavailable(e) => {
                e.is_unauthorized()
            }
            _ => false,
        }
    }
}

/// 爬取用例
///
/// 负责发起 Firecrawl 爬取任务，以及把本地 Webhook 记录与上游状态一起返回
pub struct CrawlUseCase<S: ?Sized, C: ?Sized> {
    store: Arc<S>,
    client: Arc<C>,
    settings: Arc<Settings>,
}

impl<S, C> CrawlUseCase<S, C>
where
    S: UrlStore + ?Sized + 'static,
    C: CrawlApiClient + ?Sized + 'static,
{
    pub fn new(store: Arc<S>, client: Arc<C>, settings: Arc<Settings>) -> Self {
        Self {
            store,
            client,
            settings,
        }
    }

    fn public_base_url(&self) -> Result<&str, CrawlUseCaseError> {
        self.settings
            .webhook
            .public_base_url
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(CrawlUseCaseError::MissingConfig(SERVER_URL_ENV))
    }

    fn api_key(&self) -> Result<&str, CrawlUseCaseError> {
        self.settings
            .firecrawl
            .api_key
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or(CrawlUseCaseError::MissingConfig(FIRECRAWL_API_KEY_ENV))
    }

    /// 发起爬取
    ///
    /// 先重置域名对应的 URL 列表，再向 Firecrawl 提交任务，
    /// 确保之后到达的 Webhook 只会追加到空列表上
    pub async fn start_crawl(&self, dto: CrawlRequestDto) -> Result<CrawlJob, CrawlUseCaseError> {
        let base_url = self.public_base_url()?;
        let api_key = self.api_key()?;

        dto.validate()
            .map_err(|e| CrawlUseCaseError::ValidationError(e.to_string()))?;

        let domain = top_level_domain(&dto.url)?;
        info!(domain = %domain, "Top level domain");

        let webhook = webhook_url(base_url, &domain);

        if let Err(e) = self.store.reset(&domain).await {
            error!(domain = %domain, error = %e, "Error clearing store");
            return Err(CrawlUseCaseError::StoreReset(e));
        }

        info!(url = %dto.url, webhook = %webhook, "Crawl requested");

        let request = CrawlJobRequest::new(
            dto.url,
            webhook,
            self.settings.crawl.limit,
            self.settings.crawl.allow_external_links,
        );

        match self.client.start_crawl(api_key, &request).await {
            Ok(job) => {
                counter!(CRAWLS_STARTED).increment(1);
                info!(job_id = %job.id, domain = %domain, "Crawl started");
                Ok(job)
            }
            Err(e) if e.is_unauthorized() => {
                counter!(CRAWL_FAILURES, "kind" => "unauthorized").increment(1);
                error!(error = %e, "Invalid token. Check {}", FIRECRAWL_API_KEY_ENV);
                Err(CrawlUseCaseError::CrawlRejected(e))
            }
            Err(e) => {
                counter!(CRAWL_FAILURES, "kind" => "upstream").increment(1);
                error!(error = %e, "Crawl request failed");
                Err(CrawlUseCaseError::CrawlRejected(e))
            }
        }
    }

    /// 轮询爬取进度
    ///
    /// 返回本地 Webhook 记录和 Firecrawl 状态接口的页面列表，两者不合并
    pub async fn poll(
        &self,
        domain: &str,
        dto: PollRequestDto,
    ) -> Result<PollResponseDto, CrawlUseCaseError> {
        let api_key = self.api_key()?;

        dto.validate()
            .map_err(|e| CrawlUseCaseError::ValidationError(e.to_string()))?;

        let webhook = self
            .store
            .get(domain)
            .await
            .map_err(CrawlUseCaseError::StoreRead)?;

        let report = self
            .client
            .crawl_status(api_key, &dto.crawl_id)
            .await
            .map_err(|e| match e {
                CrawlApiError::InvalidJobId(_) => CrawlUseCaseError::ValidationError(e.to_string()),
                e => {
                    warn!(crawl_id = %dto.crawl_id, error = %e, "Failed to fetch crawl status");
                    CrawlUseCaseError::StatusUnavailable(e)
                }
            })?;

        counter!(POLLS).increment(1);

        Ok(PollResponseDto {
            status: report.status,
            webhook,
            polling: report.page_urls,
            total: report.total,
            completed: report.completed,
        })
    }
}
