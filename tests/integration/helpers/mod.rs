// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use gzcourt_notices::application::usecases::run_search::RunSearchUseCase;
use gzcourt_notices::config::settings::{HttpSettings, SiteSettings};
use gzcourt_notices::domain::services::page_fetcher::PageFetcher;
use gzcourt_notices::domain::services::search_service::SearchService;
use gzcourt_notices::engines::memory_engine::RecordingRenderer;
use gzcourt_notices::engines::reqwest_engine::ReqwestEngine;
use gzcourt_notices::infrastructure::storage::ArtifactStore;
use gzcourt_notices::presentation::routes;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LISTING_PATH: &str = "/other/ck601/";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub site: MockServer,
    pub renderer: Arc<RecordingRenderer>,
    pub output: TempDir,
}

/// 由 `(href, title)` 组成的列表页
pub fn listing(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(href, title)| format!("<li><span>{}</span><a href=\"{}\">{}</a></li>", href, href, title))
        .collect();
    format!(
        "<html><body><div class=\"list\"><ul>{}</ul></div><ul><li>无链接条目</li></ul></body></html>",
        items
    )
}

pub fn page_path(page: u32) -> String {
    if page == 1 {
        format!("{}index.html", LISTING_PATH)
    } else {
        format!("{}index{}.html", LISTING_PATH, page - 1)
    }
}

/// 在模拟站点上挂载一页列表，要求请求携带 User-Agent
pub async fn mount_page(site: &MockServer, page: u32, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path(page)))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(site)
        .await;
}

/// 默认站点：第1页有一条 (2024)粤01 公告，第2页只有其他公告
pub async fn mount_default_site(site: &MockServer) {
    mount_page(
        site,
        1,
        200,
        listing(&[
            ("/notice/100.html", "(2024)粤01民初100号 送达公告"),
            ("/notice/101.html", "(2023)粤02民初7号 送达公告"),
        ]),
    )
    .await;
    mount_page(
        site,
        2,
        200,
        listing(&[("http://elsewhere.test/n/1.html", "(2022)粤03民初1号 送达公告")]),
    )
    .await;
}

pub fn site_settings(site: &MockServer) -> SiteSettings {
    SiteSettings {
        origin: site.uri(),
        listing_base: format!("{}{}", site.uri(), LISTING_PATH),
    }
}

pub fn search_service(site: &MockServer, workers: usize) -> Arc<SearchService> {
    let fetcher = PageFetcher::new(Arc::new(ReqwestEngine::new()), &site_settings(site));
    Arc::new(SearchService::new(Arc::new(fetcher), workers))
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with_renderer(RecordingRenderer::new()).await
}

pub async fn create_test_app_with_renderer(renderer: RecordingRenderer) -> TestApp {
    let site = MockServer::start().await;
    mount_default_site(&site).await;

    let output = tempfile::tempdir().unwrap();
    let renderer = Arc::new(renderer);
    let use_case = Arc::new(RunSearchUseCase::new(
        search_service(&site, 4),
        renderer.clone(),
        ArtifactStore::new(output.path()),
        &HttpSettings::default(),
    ));

    let server = TestServer::new(routes::app(use_case)).unwrap();

    TestApp {
        server,
        site,
        renderer,
        output,
    }
}
