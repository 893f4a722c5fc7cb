// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 存储文件内容无法解析或序列化
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// URL 存储仓库特质
///
/// 按域名保存通过 Webhook 发现的页面 URL，列表顺序即发现顺序，不去重
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// 获取域名下的 URL 列表，不存在时返回空列表
    async fn get(&self, domain: &str) -> Result<Vec<String>, StoreError>;

    /// 追加一个 URL，域名不存在时自动创建
    async fn append_url(&self, domain: &str, url: &str) -> Result<(), StoreError>;

    /// 将域名的 URL 列表重置为空
    async fn reset(&self, domain: &str) -> Result<(), StoreError>;
}
