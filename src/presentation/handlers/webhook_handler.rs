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

use crate::application::dto::webhook_response::WebhookAckDto;
use crate::application::use_cases::webhook_use_case::WebhookUseCase;
use crate::domain::models::webhook::WebhookEvent;
use crate::domain::repositories::url_store_repository::UrlStore;
use axum::{body::Bytes, extract::Path, Extension, Json};
use std::sync::Arc;
use tracing::{error, info, warn};

/// 接收 Firecrawl Webhook
///
/// 请求体按原始字节读取后宽松解析，无论内容、事件类型和处理结果如何都返回确认，避免上游重试
pub async fn receive_webhook<S>(
    Extension(store): Extension<Arc<S>>,
    Path(domain): Path<String>,
    body: Bytes,
) -> Json<WebhookAckDto>
where
    S: UrlStore + 'static,
{
    let event = WebhookEvent::from_slice(&body);
    info!(
        domain = %domain,
        event_type = %event.event_type,
        job_id = event.id.as_deref().unwrap_or("-"),
        "Incoming: /api/webhook"
    );
    if let Some(message) = &event.error {
        warn!(domain = %domain, job_id = ?event.id, error = %message, "Crawl reported an error");
    }

    let use_case = WebhookUseCase::new(store);
    if let Err(e) = use_case.handle(&domain, &event).await {
        error!(domain = %domain, error = %e, "Failed to record webhook page");
    }

    Json(WebhookAckDto::default())
}
