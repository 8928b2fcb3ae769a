// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 领域层错误类型
#[derive(Error, Debug)]
pub enum DomainError {
    /// 输入不符合领域规则
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 生成文件过程失败
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),
}

/// 生成文件（报告、PDF、压缩包）相关错误
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("文档生成失败: {0}")]
    Document(String),

    #[error("压缩包生成失败: {0}")]
    Archive(String),

    #[error("文件不存在: {0}")]
    NotFound(String),

    #[error("invalid artifact name: {0}")]
    InvalidName(String),
}
