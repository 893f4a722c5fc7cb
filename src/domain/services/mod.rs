// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务接口：
/// - 爬取 API（crawl_api）：提交爬取任务和查询任务状态的外部服务抽象
pub mod crawl_api;
