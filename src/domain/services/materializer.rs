// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::models::notice::MatchResult;
use crate::domain::models::report::Report;
use crate::domain::models::session::SearchSession;
use crate::engines::traits::PageRenderer;

/// 命中结果落地器
///
/// 把每条命中写入报告，并把列表页和公告页分别渲染为PDF。
/// 文件名只由关键字和页码决定，因此同一输出目录下的调用必须串行进行。
pub struct Materializer {
    renderer: Arc<dyn PageRenderer>,
    output_dir: PathBuf,
}

impl Materializer {
    pub fn new(renderer: Arc<dyn PageRenderer>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            output_dir: output_dir.into(),
        }
    }

    /// 列表页PDF文件名：`{keyword}_page_{page}.pdf`
    pub fn page_file_name(session: &SearchSession, page_index: u32) -> String {
        format!("{}_page_{}.pdf", session.file_stem(), page_index)
    }

    /// 公告页PDF文件名：`{keyword}_notice_{page}.pdf`
    pub fn notice_file_name(session: &SearchSession, page_index: u32) -> String {
        format!("{}_notice_{}.pdf", session.file_stem(), page_index)
    }

    /// 落地一条命中结果
    ///
    /// # 参数
    ///
    /// * `result` - 命中结果
    /// * `report` - 追加四行描述的报告
    /// * `session` - 记录生成文件名的会话
    ///
    /// 渲染失败只记录日志；文件名仍然记录在会话中，交付时再检查文件是否存在
    pub async fn materialize(
        &self,
        result: &MatchResult,
        report: &mut Report,
        session: &mut SearchSession,
    ) {
        report.add_match(result);

        let page_file = Self::page_file_name(session, result.page_index);
        self.render(&result.notice.source_page_url, &page_file).await;
        session.record_artifact(page_file);

        let notice_file = Self::notice_file_name(session, result.page_index);
        self.render(&result.notice.link, &notice_file).await;
        session.record_artifact(notice_file);
    }

    async fn render(&self, url: &str, file_name: &str) {
        let output = self.output_dir.join(file_name);
        match self.renderer.render_pdf(url, &output).await {
            Ok(()) => debug!("Rendered {} to {}", url, output.display()),
            Err(e) => warn!(
                "Failed to render {} with {} renderer: {}",
                url,
                self.renderer.name(),
                e
            ),
        }
    }
}

#[cfg(test)]
#[path = "materializer_test.rs"]
mod tests;
