// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 提供领域接口的具体实现：
/// - Firecrawl 客户端（firecrawl）
/// - Prometheus 指标导出（metrics）
/// - JSON 文件存储（storage）
pub mod firecrawl;
pub mod metrics;
pub mod storage;
