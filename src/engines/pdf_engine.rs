// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::RendererSettings;
use crate::engines::traits::{PageRenderer, RenderError};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::future::Future;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Chromium PDF渲染引擎
///
/// 基于chromiumoxide驱动无头Chrome，把在线页面打印为PDF。
/// 浏览器在首次渲染时启动（或连接远程实例），之后复用；连接断开后下一次渲染会重新启动。
pub struct ChromiumRenderer {
    remote_debugging_url: Option<String>,
    request_timeout: Duration,
    browser: BrowserSlot<Browser>,
}

impl ChromiumRenderer {
    pub fn new(settings: &RendererSettings) -> Self {
        Self {
            remote_debugging_url: settings.remote_debugging_url.clone(),
            request_timeout: Duration::from_secs(settings.request_timeout_secs.max(1)),
            browser: BrowserSlot::new(),
        }
    }

    async fn browser(&self) -> Result<Arc<Browser>, RenderError> {
        self.browser.get_or_launch(|| self.launch()).await
    }

    // The returned flag drops to false once the CDP handler loop ends.
    async fn launch(&self) -> Result<(Browser, Arc<AtomicBool>), RenderError> {
        let (browser, mut handler) = if let Some(url) = &self.remote_debugging_url {
            tracing::info!("Connecting to remote Chrome instance at: {}", url);
            Browser::connect(url.as_str()).await.map_err(|e| {
                RenderError::Browser(format!("Failed to connect to remote Chrome: {}", e))
            })?
        } else {
            let config = BrowserConfig::builder()
                .no_sandbox()
                .request_timeout(self.request_timeout)
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage")
                .build()
                .map_err(RenderError::Browser)?;

            Browser::launch(config)
                .await
                .map_err(|e| RenderError::Browser(e.to_string()))?
        };

        let alive = Arc::new(AtomicBool::new(true));
        let flag = alive.clone();
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Chrome handler error: {}", e);
                    break;
                }
            }
            flag.store(false, Ordering::SeqCst);
            tracing::warn!("Chrome connection closed");
        });

        Ok((browser, alive))
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    /// 打开页面、等待加载完成并打印为PDF
    ///
    /// 无论导航、打印成功与否或是否超时，打开的标签页都会被关闭
    ///
    /// # 参数
    ///
    /// * `url` - 要渲染的页面地址
    /// * `output` - PDF输出路径
    async fn render_pdf(&self, url: &str, output: &Path) -> Result<(), RenderError> {
        let browser = self.browser().await?;

        let page = tokio::time::timeout(self.request_timeout, browser.new_page("about:blank"))
            .await
            .map_err(|_| RenderError::Timeout)?
            .map_err(|e| RenderError::Browser(e.to_string()))?;

        let pdf = print_then_close(page, url, self.request_timeout * 2).await?;

        tokio::fs::write(output, pdf).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}

/// 一个可以打印并关闭的浏览器标签页
#[async_trait]
trait PrintTab: Send + Sync {
    async fn print(&self, url: &str) -> Result<Vec<u8>, RenderError>;

    async fn close(self) -> Result<(), RenderError>;
}

#[async_trait]
impl PrintTab for Page {
    async fn print(&self, url: &str) -> Result<Vec<u8>, RenderError> {
        self.goto(url)
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))?;
        self.wait_for_navigation()
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))?;
        self.pdf(PrintToPdfParams::default())
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))
    }

    async fn close(self) -> Result<(), RenderError> {
        Page::close(self)
            .await
            .map_err(|e| RenderError::Browser(e.to_string()))
    }
}

/// 在时限内打印标签页，然后无条件关闭它
async fn print_then_close<T: PrintTab>(
    tab: T,
    url: &str,
    limit: Duration,
) -> Result<Vec<u8>, RenderError> {
    let printed = tokio::time::timeout(limit, tab.print(url))
        .await
        .unwrap_or(Err(RenderError::Timeout));

    match tokio::time::timeout(limit, tab.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::debug!("Failed to close page for {}: {}", url, e),
        Err(_) => tracing::debug!("Timed out closing page for {}", url),
    }

    printed
}

/// 共享的浏览器实例，存活标志失效后在下一次取用时重新启动
struct BrowserSlot<T> {
    current: Mutex<Option<(Arc<T>, Arc<AtomicBool>)>>,
}

impl<T> BrowserSlot<T> {
    fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    async fn get_or_launch<F, Fut>(&self, launch: F) -> Result<Arc<T>, RenderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(T, Arc<AtomicBool>), RenderError>>,
    {
        let mut current = self.current.lock().await;
        if let Some((instance, alive)) = current.as_ref() {
            if alive.load(Ordering::SeqCst) {
                return Ok(instance.clone());
            }
            tracing::warn!("Browser is no longer running, relaunching");
        }

        let (instance, alive) = launch().await?;
        let instance = Arc::new(instance);
        *current = Some((instance.clone(), alive));
        Ok(instance)
    }
}

/// 关闭渲染时使用的渲染器，每次调用都返回 `RenderError::Disabled`
pub struct DisabledRenderer;

#[async_trait]
impl PageRenderer for DisabledRenderer {
    async fn render_pdf(&self, _url: &str, _output: &Path) -> Result<(), RenderError> {
        Err(RenderError::Disabled)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// 根据配置创建渲染器
pub fn create_renderer(settings: &RendererSettings) -> Arc<dyn PageRenderer> {
    if settings.enabled {
        Arc::new(ChromiumRenderer::new(settings))
    } else {
        Arc::new(DisabledRenderer)
    }
}
