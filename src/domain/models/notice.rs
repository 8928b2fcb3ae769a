// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::utils::errors::DomainError;

/// 送达公告记录
///
/// 由列表页中一个带链接的 `<li>` 生成，创建后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoticeRecord {
    /// 公告标题
    pub title: String,
    /// 公告链接（绝对地址）
    pub link: String,
    /// 公告所在列表页地址
    pub source_page_url: String,
}

impl NoticeRecord {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        source_page_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            source_page_url: source_page_url.into(),
        }
    }
}

/// 单页抓取任务
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageTask {
    /// 页码，从1开始
    pub page_index: u32,
}

/// 命中结果：标题包含关键字的公告及其所在页码
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult {
    pub page_index: u32,
    pub notice: NoticeRecord,
}

impl MatchResult {
    pub fn new(page_index: u32, notice: NoticeRecord) -> Self {
        Self { page_index, notice }
    }
}

/// 闭区间页码范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// 创建页码范围
    ///
    /// # 参数
    ///
    /// * `start` - 起始页码（>= 1）
    /// * `end` - 结束页码（>= start）
    ///
    /// # 返回值
    ///
    /// * `Ok(PageRange)` - 合法的范围
    /// * `Err(DomainError)` - 起始页为0或结束页小于起始页
    pub fn new(start: u32, end: u32) -> Result<Self, DomainError> {
        if start == 0 {
            return Err(DomainError::ValidationError(
                "start_page must be at least 1".to_string(),
            ));
        }
        if end < start {
            return Err(DomainError::ValidationError(format!(
                "end_page ({}) must not be less than start_page ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn page_count(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// 按页码顺序生成每页的抓取任务
    pub fn tasks(&self) -> impl Iterator<Item = PageTask> {
        (self.start..=self.end).map(|page_index| PageTask { page_index })
    }
}
