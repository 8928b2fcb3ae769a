// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::application::usecases::run_search::RunSearchUseCase;
use crate::presentation::errors::AppError;

/// 下载一次运行生成的文件
///
/// # 参数
///
/// * `run_id` - 运行ID
/// * `file_name` - 文件名，不能包含路径成分
///
/// # 返回值
///
/// 以附件形式返回文件内容；运行或文件不存在时返回404
pub async fn download(
    Extension(use_case): Extension<Arc<RunSearchUseCase>>,
    Path((run_id, file_name)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let path = use_case.store().resolve(&run_id, &file_name).await?;
    let bytes = tokio::fs::read(&path).await?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(&file_name)
    ))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(content_type(&file_name))),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

fn content_type(file_name: &str) -> &'static str {
    match file_name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("pdf") => "application/pdf",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
