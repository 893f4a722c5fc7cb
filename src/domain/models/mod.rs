// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 爬取任务（crawl）：外部爬取任务、提交请求和状态报告
/// - 网络钩子（webhook）：Firecrawl 推送的页面发现事件
pub mod crawl;
pub mod webhook;
