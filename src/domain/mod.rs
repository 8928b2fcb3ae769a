// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：公告记录、页码范围、搜索会话和报告
/// - 服务（services）：列表解析、单页抓取、并行搜索和结果落地
///
/// 领域层只依赖引擎特质，不依赖具体的网络或浏览器实现。
pub mod models;
pub mod services;
