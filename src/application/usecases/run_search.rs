// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::run_summary::{ArtifactLink, KeywordSummary, RunSummary};
use crate::application::dto::search_request::SearchRequestDto;
use crate::config::settings::HttpSettings;
use crate::domain::models::notice::PageRange;
use crate::domain::models::report::Report;
use crate::domain::models::session::{FileStemAllocator, HeaderProfile, SearchSession};
use crate::domain::services::materializer::Materializer;
use crate::domain::services::search_service::SearchService;
use crate::engines::traits::PageRenderer;
use crate::infrastructure::archive::{build_archive, ARCHIVE_FILE_NAME};
use crate::infrastructure::document::{report_file_name, write_report};
use crate::infrastructure::storage::{artifact_exists, ArtifactStore};
use crate::utils::errors::DomainError;

// === Section: Use Case Definition ===

/// 搜索运行用例
///
/// 一次运行依次处理每个关键字：并行搜索、逐条落地、写报告、检查交付文件，
/// 最后把所有存在的文件打包。单页抓取或单个渲染失败不会让运行失败。
pub struct RunSearchUseCase {
    search_service: Arc<SearchService>,
    renderer: Arc<dyn PageRenderer>,
    store: ArtifactStore,
    user_agents: Vec<String>,
    accept_language: String,
}

struct Delivery {
    artifacts: Vec<String>,
    missing: Vec<String>,
}

// === Section: Implementation ===

impl RunSearchUseCase {
    pub fn new(
        search_service: Arc<SearchService>,
        renderer: Arc<dyn PageRenderer>,
        store: ArtifactStore,
        http: &HttpSettings,
    ) -> Self {
        Self {
            search_service,
            renderer,
            store,
            user_agents: http.user_agents.clone(),
            accept_language: http.accept_language.clone(),
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// 执行一次搜索运行
    ///
    /// # 参数
    ///
    /// * `request` - 关键字和页码范围
    ///
    /// # 返回值
    ///
    /// * `Ok(RunSummary)` - 运行结果和下载链接
    /// * `Err(DomainError::ValidationError)` - 输入不合法
    /// * `Err(DomainError::Artifact)` - 无法创建运行目录、写报告或打包
    pub async fn execute(&self, request: SearchRequestDto) -> Result<RunSummary, DomainError> {
        request
            .validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;

        let keywords = request.keyword_list();
        let range = PageRange::new(request.start_page, request.end_page)?;

        let run_id = Uuid::new_v4();
        let run_dir = self.store.create_run_dir(&run_id).await?;
        info!(
            "Run {} started: {} keywords, pages {}-{}",
            run_id,
            keywords.len(),
            range.start(),
            range.end()
        );

        let materializer = Materializer::new(self.renderer.clone(), &run_dir);
        let mut summaries = Vec::with_capacity(keywords.len());
        let mut archive_files = Vec::new();
        let mut stems = FileStemAllocator::new();

        for keyword in keywords {
            let stem = stems.allocate(&keyword);
            let summary = self
                .run_keyword(&run_id, &run_dir, &materializer, keyword, stem, range)
                .await?;

            archive_files.push(summary.report.file_name.clone());
            archive_files.extend(summary.artifacts.iter().map(|a| a.file_name.clone()));
            summaries.push(summary);
        }

        let archived = build_archive(&run_dir, archive_files, ARCHIVE_FILE_NAME).await?;
        let summary = RunSummary {
            run_id,
            created_at: Utc::now(),
            keywords: summaries,
            archive: ArtifactLink::new(&run_id, ARCHIVE_FILE_NAME),
        };
        info!(
            "Run {} finished: {} notices found, {} files archived into {}",
            run_id,
            summary.total_matches(),
            archived.len(),
            ARCHIVE_FILE_NAME
        );

        Ok(summary)
    }

    async fn run_keyword(
        &self,
        run_id: &Uuid,
        run_dir: &Path,
        materializer: &Materializer,
        keyword: String,
        file_stem: String,
        range: PageRange,
    ) -> Result<KeywordSummary, DomainError> {
        let headers = self.pick_headers()?;
        let mut session = SearchSession::new(keyword, range, headers).with_file_stem(file_stem);

        let outcome = self.search_service.search(&session).await;

        let mut report = Report::new();
        for result in &outcome.matches {
            materializer
                .materialize(result, &mut report, &mut session)
                .await;
        }
        report.finish();

        let report_name = report_file_name(&session);
        write_report(&report, &run_dir.join(&report_name)).await?;

        let delivery = check_delivery(run_dir, session.artifacts()).await;

        Ok(KeywordSummary {
            keyword: session.keyword().to_string(),
            notices: outcome.matches,
            pages_scanned: outcome.pages_scanned,
            failed_pages: outcome.failed_pages,
            report: ArtifactLink::new(run_id, report_name),
            artifacts: delivery
                .artifacts
                .into_iter()
                .map(|name| ArtifactLink::new(run_id, name))
                .collect(),
            missing_artifacts: delivery.missing,
        })
    }

    // ThreadRng is not Send, so it must not live across an await.
    fn pick_headers(&self) -> Result<HeaderProfile, DomainError> {
        let mut rng = rand::rng();
        HeaderProfile::pick(&self.user_agents, &self.accept_language, &mut rng).ok_or_else(|| {
            DomainError::ValidationError("user agent pool cannot be empty".to_string())
        })
    }
}

/// 检查会话记录的文件是否真的生成了
///
/// 重复的文件名只保留第一次出现；不存在的文件记入 `missing`
async fn check_delivery(run_dir: &Path, recorded: &[String]) -> Delivery {
    let mut delivery = Delivery {
        artifacts: Vec::new(),
        missing: Vec::new(),
    };

    for name in recorded {
        if delivery.artifacts.contains(name) || delivery.missing.contains(name) {
            continue;
        }
        if artifact_exists(run_dir, name).await {
            delivery.artifacts.push(name.clone());
        } else {
            warn!("Missing artifact {} in {}", name, run_dir.display());
            delivery.missing.push(name.clone());
        }
    }

    delivery
}

#[cfg(test)]
#[path = "run_search_test.rs"]
mod tests;
