// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置，包括服务器、目标站点、HTTP请求头、搜索并发和PDF渲染等配置
pub mod settings;
