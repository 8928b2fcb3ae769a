// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::usecases::run_search::RunSearchUseCase;
use crate::presentation::handlers::{download_handler, form_handler, search_handler};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由（尚未注入用例）
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let search_routes = Router::new()
        .route("/", get(form_handler::index))
        .route("/search", post(search_handler::search_form))
        .route("/v1/search", post(search_handler::search))
        .route(
            "/v1/runs/{run_id}/files/{file_name}",
            get(download_handler::download),
        );

    Router::new().merge(public_routes).merge(search_routes)
}

/// 创建完整的应用：路由、用例注入和请求追踪
pub fn app(use_case: Arc<RunSearchUseCase>) -> Router {
    routes()
        .layer(Extension(use_case))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
