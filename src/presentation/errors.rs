// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::utils::errors::{ArtifactError, DomainError};

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// 错误对应的HTTP状态码
    pub fn status(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<DomainError>() {
            return match err {
                DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,
                DomainError::Artifact(artifact) => artifact_status(artifact),
            };
        }
        if let Some(artifact) = self.0.downcast_ref::<ArtifactError>() {
            return artifact_status(artifact);
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }

    pub fn message(&self) -> String {
        self.0.to_string()
    }
}

fn artifact_status(err: &ArtifactError) -> StatusCode {
    match err {
        ArtifactError::NotFound(_) => StatusCode::NOT_FOUND,
        ArtifactError::InvalidName(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:#}", self.0);
        }

        let body = Json(json!({ "error": self.message() }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
