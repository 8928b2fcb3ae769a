// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use docx_rs::{Docx, Paragraph, Run};
use std::io::Cursor;
use std::path::Path;
use tokio::fs;

use crate::domain::models::report::Report;
use crate::domain::models::session::SearchSession;
use crate::utils::errors::ArtifactError;

/// 报告文件名：`delivery_notices_{keyword}.docx`
pub fn report_file_name(session: &SearchSession) -> String {
    format!("delivery_notices_{}.docx", session.file_stem())
}

/// 把报告渲染为DOCX字节，每个段落对应文档中的一段
pub fn render_docx(report: &Report) -> Result<Vec<u8>, ArtifactError> {
    let docx = report
        .paragraphs()
        .iter()
        .fold(Docx::new(), |docx, text| {
            docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
        });

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| ArtifactError::Document(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// 生成报告并写入 `path`
///
/// # 参数
///
/// * `report` - 已经完成（`Report::finish`）的报告
/// * `path` - 输出文件路径
pub async fn write_report(report: &Report, path: &Path) -> Result<(), ArtifactError> {
    let bytes = render_docx(report)?;
    fs::write(path, bytes).await?;
    tracing::debug!(
        "Wrote report with {} paragraphs to {}",
        report.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
#[path = "document_test.rs"]
mod tests;
