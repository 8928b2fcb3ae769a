// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含搜索用例和请求/响应数据结构
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含公告模型、页面抓取、并行搜索和结果落地
pub mod domain;

/// 引擎模块
///
/// HTTP抓取引擎和PDF渲染引擎
pub mod engines;

/// 基础设施模块
///
/// 报告文档、压缩包和运行目录存储
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 工具模块
///
/// 错误类型和遥测初始化
pub mod utils;
