// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 发起爬取请求数据传输对象
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CrawlRequestDto {
    /// 爬取起始 URL，必须是绝对地址
    #[validate(url)]
    pub url: String,
}

/// 发起爬取响应数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct CrawlResponseDto {
    /// Firecrawl 任务 ID
    pub id: String,
}
