// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use crate::engines::traits::{
    EngineError, FetchRequest, FetchResponse, PageRenderer, RenderError, ScraperEngine,
};

#[derive(Clone)]
struct CannedPage {
    status_code: u16,
    body: String,
    delay: Option<Duration>,
}

/// 测试用的内存抓取引擎（用于单元测试）
///
/// 按URL返回预设的状态码和内容；未登记的URL视为网络错误。记录所有收到的请求。
#[derive(Default)]
pub struct InMemoryEngine {
    pages: Mutex<HashMap<String, CannedPage>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: impl Into<String>, status_code: u16, body: impl Into<String>) -> Self {
        self.insert_page(url, status_code, body, None);
        self
    }

    pub fn with_delayed_page(
        self,
        url: impl Into<String>,
        status_code: u16,
        body: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.insert_page(url, status_code, body, Some(delay));
        self
    }

    pub fn insert_page(
        &self,
        url: impl Into<String>,
        status_code: u16,
        body: impl Into<String>,
        delay: Option<Duration>,
    ) {
        if let Ok(mut pages) = self.pages.lock() {
            pages.insert(
                url.into(),
                CannedPage {
                    status_code,
                    body: body.into(),
                    delay,
                },
            );
        }
    }

    /// 已收到的请求（按到达顺序）
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ScraperEngine for InMemoryEngine {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let page = self
            .pages
            .lock()
            .ok()
            .and_then(|pages| pages.get(&request.url).cloned());

        let page = page.ok_or_else(|| EngineError::Other(format!("no route to {}", request.url)))?;

        if let Some(delay) = page.delay {
            tokio::time::sleep(delay).await;
        }

        Ok(FetchResponse {
            status_code: page.status_code,
            content: page.body,
            content_type: "text/html".to_string(),
            response_time_ms: page.delay.map(|d| d.as_millis() as u64).unwrap_or(0),
        })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// 测试用的渲染器（用于单元测试）
///
/// 不启动浏览器，直接写入一个最小的PDF占位文件；登记为失败的URL返回错误且不写文件。
#[derive(Default)]
pub struct RecordingRenderer {
    failing: Mutex<HashSet<String>>,
    rendered: Mutex<Vec<(String, PathBuf)>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(self, url: impl Into<String>) -> Self {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(url.into());
        }
        self
    }

    /// 成功渲染的 `(url, 输出路径)` 记录
    pub fn rendered(&self) -> Vec<(String, PathBuf)> {
        self.rendered
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageRenderer for RecordingRenderer {
    async fn render_pdf(&self, url: &str, output: &Path) -> Result<(), RenderError> {
        let fails = self
            .failing
            .lock()
            .map(|f| f.contains(url))
            .unwrap_or(false);
        if fails {
            return Err(RenderError::Browser(format!("navigation to {} failed", url)));
        }

        tokio::fs::write(output, format!("%PDF-1.4\n% {}\n%%EOF\n", url)).await?;
        if let Ok(mut rendered) = self.rendered.lock() {
            rendered.push((url.to_string(), output.to_path_buf()));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
