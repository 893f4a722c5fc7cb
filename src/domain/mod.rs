// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务抽象，包括：
/// - 领域模型（models）：爬取任务和 Webhook 事件
/// - 仓库接口（repositories）：URL 存储抽象接口
/// - 服务（services）：外部爬取 API 抽象接口
pub mod models;
pub mod repositories;
pub mod services;
