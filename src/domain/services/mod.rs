// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 公告解析（notice_extractor）：从列表页HTML中提取公告
/// - 单页抓取（page_fetcher）：抓取一页并按关键字过滤
/// - 并行搜索（search_service）：在页码范围内并发抓取并汇总
/// - 结果落地（materializer）：写报告并把页面渲染为PDF
pub mod materializer;
pub mod notice_extractor;
pub mod page_fetcher;
pub mod search_service;
