// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::domain::models::notice::NoticeRecord;

static ITEM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("static selector"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector"));

/// 送达公告列表解析器
///
/// 从列表页HTML中提取 `(标题, 链接, 来源页)` 记录。
/// 纯函数，不做任何网络访问；HTML格式错误时只会得到更少的记录，不会报错。
#[derive(Debug, Clone)]
pub struct NoticeExtractor {
    origin: String,
}

impl NoticeExtractor {
    /// # 参数
    ///
    /// * `origin` - 以 `/` 开头的相对链接补全使用的站点源
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// 解析列表页
    ///
    /// # 参数
    ///
    /// * `html` - 列表页内容
    /// * `page_url` - 列表页地址，记录为公告的来源页
    ///
    /// # 返回值
    ///
    /// 按文档顺序排列的公告记录
    pub fn extract(&self, html: &str, page_url: &str) -> Vec<NoticeRecord> {
        let document = Html::parse_document(html);

        document
            .select(&ITEM_SELECTOR)
            .filter_map(|item| {
                let anchor = item.select(&ANCHOR_SELECTOR).next()?;
                let href = anchor.value().attr("href")?;
                let title = anchor.text().collect::<String>().trim().to_string();

                Some(NoticeRecord::new(title, self.absolutize(href), page_url))
            })
            .collect()
    }

    fn absolutize(&self, href: &str) -> String {
        if href.starts_with('/') {
            format!("{}{}", self.origin, href)
        } else {
            href.to_string()
        }
    }
}

#[cfg(test)]
#[path = "notice_extractor_test.rs"]
mod tests;
