// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::application::use_cases::crawl_use_case::CrawlUseCaseError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口。
/// 上游和存储的具体错误只写入日志，不返回给调用方。
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// 错误对应的 HTTP 状态码和对外消息
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self.0.downcast_ref::<CrawlUseCaseError>() {
            Some(err) if err.is_unauthorized() => {
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            Some(err @ CrawlUseCaseError::MissingConfig(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            Some(err @ CrawlUseCaseError::ValidationError(_))
            | Some(err @ CrawlUseCaseError::InvalidUrl(_)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Some(CrawlUseCaseError::StoreReset(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error clearing store".to_string(),
            ),
            Some(CrawlUseCaseError::StoreRead(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error reading store".to_string(),
            ),
            Some(CrawlUseCaseError::StatusUnavailable(_)) => (
                StatusCode::BAD_GATEWAY,
                "Failed to fetch crawl status".to_string(),
            ),
            Some(CrawlUseCaseError::CrawlRejected(_)) | None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(error = %self.0, status = %status, "Request failed");
        }

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
