// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 轮询请求数据传输对象
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PollRequestDto {
    /// 发起爬取时返回的任务 ID
    #[validate(length(min = 1))]
    pub crawl_id: String,
}

/// 轮询响应数据传输对象
///
/// `webhook` 与 `polling` 两个列表原样返回，不做合并或去重
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PollResponseDto {
    /// Firecrawl 报告的任务状态
    pub status: String,
    /// 通过 Webhook 记录的 URL
    pub webhook: Vec<String>,
    /// Firecrawl 状态接口返回的 URL
    pub polling: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<u64>,
}
