// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::config::settings::SiteSettings;
use crate::domain::models::notice::MatchResult;
use crate::domain::models::session::HeaderProfile;
use crate::domain::services::notice_extractor::NoticeExtractor;
use crate::engines::traits::{EngineError, FetchRequest, ScraperEngine};

/// 单页抓取器
///
/// 计算页码对应的地址，发起一次GET请求，解析列表并按关键字过滤
pub struct PageFetcher {
    engine: Arc<dyn ScraperEngine>,
    extractor: NoticeExtractor,
    listing_base: String,
    timeout: Option<Duration>,
}

impl PageFetcher {
    pub fn new(engine: Arc<dyn ScraperEngine>, site: &SiteSettings) -> Self {
        Self {
            engine,
            extractor: NoticeExtractor::new(site.origin.clone()),
            listing_base: site.listing_base.clone(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// 页码对应的列表页地址
    ///
    /// 第1页为 `index.html`，第n页（n > 1）为 `index{n-1}.html`
    pub fn page_url(&self, page_index: u32) -> String {
        if page_index <= 1 {
            format!("{}index.html", self.listing_base)
        } else {
            format!("{}index{}.html", self.listing_base, page_index - 1)
        }
    }

    /// 抓取一页并返回命中结果
    ///
    /// # 参数
    ///
    /// * `page_index` - 页码
    /// * `headers` - 本次会话的请求头
    /// * `keyword` - 大小写敏感的子串关键字
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<MatchResult>)` - 按文档顺序排列的命中结果，可能为空
    /// * `Err(EngineError)` - 网络错误或非2xx状态，由调用方记录并按空结果处理
    pub async fn fetch_page(
        &self,
        page_index: u32,
        headers: &HeaderProfile,
        keyword: &str,
    ) -> Result<Vec<MatchResult>, EngineError> {
        let url = self.page_url(page_index);
        let request = FetchRequest::new(url.clone(), headers.to_headers()).with_timeout(self.timeout);

        let response = self.engine.fetch(&request).await?;
        if !response.is_success() {
            return Err(EngineError::HttpStatus(response.status_code));
        }

        let notices = self.extractor.extract(&response.content, &url);
        let scanned = notices.len();

        let matches: Vec<MatchResult> = notices
            .into_iter()
            .filter(|notice| notice.title.contains(keyword))
            .map(|notice| MatchResult::new(page_index, notice))
            .collect();

        debug!(
            "Page {} ({}): {} notices, {} matching '{}' in {}ms",
            page_index,
            url,
            scanned,
            matches.len(),
            keyword,
            response.response_time_ms
        );

        Ok(matches)
    }
}

#[cfg(test)]
#[path = "page_fetcher_test.rs"]
mod tests;
