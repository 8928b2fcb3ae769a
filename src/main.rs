// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use gzcourt_notices::application::usecases::run_search::RunSearchUseCase;
use gzcourt_notices::config::settings::Settings;
use gzcourt_notices::domain::services::page_fetcher::PageFetcher;
use gzcourt_notices::domain::services::search_service::SearchService;
use gzcourt_notices::engines::pdf_engine::create_renderer;
use gzcourt_notices::engines::reqwest_engine::ReqwestEngine;
use gzcourt_notices::engines::traits::ScraperEngine;
use gzcourt_notices::infrastructure::storage::ArtifactStore;
use gzcourt_notices::presentation::routes;
use gzcourt_notices::utils::telemetry;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting gzcourt-notices...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Initialize engines
    let engine = Arc::new(ReqwestEngine::new());
    let renderer = create_renderer(&settings.renderer);
    info!(
        "Engines initialized: fetch={}, renderer={}",
        engine.name(),
        renderer.name()
    );

    // 4. Initialize search pipeline
    let fetcher = Arc::new(
        PageFetcher::new(engine, &settings.site)
            .with_timeout(settings.http.timeout_secs.map(Duration::from_secs)),
    );
    let workers = settings.search.effective_workers();
    let search_service = Arc::new(SearchService::new(fetcher, workers));
    info!("Search service ready with {} workers", workers);

    // 5. Initialize storage
    let store = ArtifactStore::from_settings(&settings.storage);
    tokio::fs::create_dir_all(store.base_path()).await?;
    info!("Artifacts will be written under {}", store.base_path().display());

    let use_case = Arc::new(RunSearchUseCase::new(
        search_service,
        renderer,
        store,
        &settings.http,
    ));

    // 6. Start HTTP server
    let app = routes::app(use_case);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
