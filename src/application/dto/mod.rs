// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义搜索请求（JSON和表单）以及运行结果
pub mod run_summary;
pub mod search_request;
