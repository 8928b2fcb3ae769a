// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Form, Json},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::application::dto::run_summary::RunSummary;
use crate::application::dto::search_request::{SearchFormDto, SearchRequestDto};
use crate::application::usecases::run_search::RunSearchUseCase;
use crate::presentation::errors::AppError;
use crate::presentation::handlers::form_handler::{render_error, render_results};
use crate::utils::errors::DomainError;

/// 处理JSON搜索请求
///
/// # 参数
///
/// * `use_case` - 搜索运行用例
/// * `payload` - 关键字和页码范围
///
/// # 返回值
///
/// 运行结果（包括下载链接）；输入不合法时返回400
pub async fn search(
    Extension(use_case): Extension<Arc<RunSearchUseCase>>,
    Json(payload): Json<SearchRequestDto>,
) -> Result<Json<RunSummary>, AppError> {
    let summary = use_case.execute(payload).await?;
    Ok(Json(summary))
}

/// 处理表单提交，返回带下载链接的HTML页面
pub async fn search_form(
    Extension(use_case): Extension<Arc<RunSearchUseCase>>,
    Form(form): Form<SearchFormDto>,
) -> Result<Response, AppError> {
    match use_case.execute(form.into()).await {
        Ok(summary) => Ok(Html(render_results(&summary)).into_response()),
        Err(DomainError::ValidationError(message)) => {
            Ok((StatusCode::BAD_REQUEST, Html(render_error(&message))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
