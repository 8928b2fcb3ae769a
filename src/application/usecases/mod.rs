// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用用例模块
///
/// 负责协调领域对象完成一次完整的搜索运行
pub mod run_search;
