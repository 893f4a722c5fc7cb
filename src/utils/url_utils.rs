// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;
use url::{ParseError, Url};

/// 域名提取错误
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid URL: {0}")]
    Parse(#[from] ParseError),
    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// 提取 URL 的“顶级域名”
///
/// 取主机名按 `.` 分割后的最后两段。这不是公共后缀列表查询，
/// `https://blog.example.co.uk` 会得到 `co.uk`。
pub fn top_level_domain(url: &str) -> Result<String, DomainError> {
    let parsed = Url::parse(url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| DomainError::MissingHost(url.to_string()))?;

    let labels: Vec<&str> = host.split('.').collect();
    let start = labels.len().saturating_sub(2);
    Ok(labels[start..].join("."))
}

/// 拼接 Webhook 回调地址 `{base}/api/webhook/{domain}`
pub fn webhook_url(public_base_url: &str, domain: &str) -> String {
    format!(
        "{}/api/webhook/{}",
        public_base_url.trim_end_matches('/'),
        domain
    )
}
