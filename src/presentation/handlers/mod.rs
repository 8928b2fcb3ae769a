// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// - 下载（download_handler）：按运行ID和文件名返回生成的文件
/// - 表单页面（form_handler）：输入表单和结果页面
/// - 搜索（search_handler）：表单和JSON两种搜索入口
pub mod download_handler;
pub mod form_handler;
pub mod search_handler;
