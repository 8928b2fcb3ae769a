// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::notice::MatchResult;

/// 没有任何命中时写入报告的唯一一行
pub const NO_NOTICES_FOUND: &str = "没有找到与任何案号相关的送达公告。";

/// 单个关键字的文字报告，按段落顺序组成
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    paragraphs: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.paragraphs.push(text.into());
    }

    /// 追加一条命中的四行描述：页码、标题、公告链接、所在页面链接
    pub fn add_match(&mut self, result: &MatchResult) {
        self.add_paragraph(format!("在第 {} 页找到了对应公告：", result.page_index));
        self.add_paragraph(format!("公告标题: {}", result.notice.title));
        self.add_paragraph(format!("公告链接: {}", result.notice.link));
        self.add_paragraph(format!("公告所在页面链接: {}", result.notice.source_page_url));
    }

    /// 报告为空时补上"未找到"提示
    pub fn finish(&mut self) {
        if self.paragraphs.is_empty() {
            self.add_paragraph(NO_NOTICES_FOUND);
        }
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }
}
