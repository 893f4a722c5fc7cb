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

use axum::{
    extract::{Extension, Path},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::{
    application::{
        dto::{
            crawl_request::{CrawlRequestDto, CrawlResponseDto},
            poll_request::{PollRequestDto, PollResponseDto},
        },
        use_cases::crawl_use_case::CrawlUseCase,
    },
    config::settings::Settings,
    domain::{repositories::url_store_repository::UrlStore, services::crawl_api::CrawlApiClient},
    presentation::errors::AppError,
};

/// 发起新的爬取任务
pub async fn start_crawl<S, C>(
    Extension(store): Extension<Arc<S>>,
    Extension(client): Extension<Arc<C>>,
    Extension(settings): Extension<Arc<Settings>>,
    Json(payload): Json<CrawlRequestDto>,
) -> Result<Json<CrawlResponseDto>, AppError>
where
    S: UrlStore + 'static,
    C: CrawlApiClient + 'static,
{
    info!("Incoming: /api/crawl");
    let use_case = CrawlUseCase::new(store, client, settings);
    let job = use_case.start_crawl(payload).await?;
    Ok(Json(CrawlResponseDto { id: job.id }))
}

/// 查询爬取进度
pub async fn poll_crawl<S, C>(
    Extension(store): Extension<Arc<S>>,
    Extension(client): Extension<Arc<C>>,
    Extension(settings): Extension<Arc<Settings>>,
    Path(domain): Path<String>,
    Json(payload): Json<PollRequestDto>,
) -> Result<Json<PollResponseDto>, AppError>
where
    S: UrlStore + 'static,
    C: CrawlApiClient + 'static,
{
    info!(domain = %domain, crawl_id = %payload.crawl_id, "Incoming: /api/poll");
    let use_case = CrawlUseCase::new(store, client, settings);
    let response = use_case.poll(&domain, payload).await?;
    Ok(Json(response))
}
