// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::notice::MatchResult;

/// 可下载的生成文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactLink {
    pub file_name: String,
    pub download_url: String,
}

impl ArtifactLink {
    pub fn new(run_id: &Uuid, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let download_url = format!(
            "/v1/runs/{}/files/{}",
            run_id,
            urlencoding::encode(&file_name)
        );
        Self {
            file_name,
            download_url,
        }
    }
}

/// 单个关键字的处理结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSummary {
    pub keyword: String,
    /// 命中的公告，按抓取完成顺序
    pub notices: Vec<MatchResult>,
    pub pages_scanned: usize,
    pub failed_pages: Vec<u32>,
    pub report: ArtifactLink,
    /// 实际存在的PDF文件
    pub artifacts: Vec<ArtifactLink>,
    /// 记录过但没有生成出来的文件名
    pub missing_artifacts: Vec<String>,
}

/// 一次运行（一次表单提交）的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub keywords: Vec<KeywordSummary>,
    pub archive: ArtifactLink,
}

impl RunSummary {
    /// 所有可下载的文件：各关键字的报告和PDF，最后是压缩包
    pub fn downloads(&self) -> Vec<&ArtifactLink> {
        self.keywords
            .iter()
            .flat_map(|k| std::iter::once(&k.report).chain(k.artifacts.iter()))
            .chain(std::iter::once(&self.archive))
            .collect()
    }

    pub fn total_matches(&self) -> usize {
        self.keywords.iter().map(|k| k.notices.len()).sum()
    }
}
