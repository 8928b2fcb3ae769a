// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含搜索运行用例以及请求/响应数据结构
pub mod dto;
pub mod usecases;
