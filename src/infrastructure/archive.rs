// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::utils::errors::ArtifactError;

/// 打包所有生成文件时使用的压缩包文件名
pub const ARCHIVE_FILE_NAME: &str = "all_generated_files.zip";

/// 把 `dir` 下列出的文件打包为 `dir/archive_name`
///
/// # 参数
///
/// * `dir` - 文件所在目录，压缩包也写在这里
/// * `files` - 要打包的文件名（相对 `dir`），按此顺序写入
/// * `archive_name` - 压缩包文件名
///
/// # 返回值
///
/// 实际写入压缩包的条目名。不存在的文件会被跳过，重复的文件名只写入一次。
pub async fn build_archive(
    dir: &Path,
    files: Vec<String>,
    archive_name: &str,
) -> Result<Vec<String>, ArtifactError> {
    let dir = dir.to_path_buf();
    let archive_path = dir.join(archive_name);

    tokio::task::spawn_blocking(move || write_archive(&dir, &files, &archive_path))
        .await
        .map_err(|e| ArtifactError::Archive(format!("archive task failed: {}", e)))?
}

fn write_archive(
    dir: &Path,
    files: &[String],
    archive_path: &Path,
) -> Result<Vec<String>, ArtifactError> {
    let mut writer = ZipWriter::new(File::create(archive_path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut seen = HashSet::new();
    let mut written = Vec::new();

    for name in files {
        if !seen.insert(name.as_str()) {
            continue;
        }

        let path = dir.join(name);
        let mut source = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Skipping missing artifact {} while archiving", path.display());
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        writer
            .start_file(name.as_str(), options)
            .map_err(|e| ArtifactError::Archive(e.to_string()))?;
        io::copy(&mut source, &mut writer)?;
        written.push(name.clone());
    }

    writer
        .finish()
        .map_err(|e| ArtifactError::Archive(e.to_string()))?;

    debug!(
        "Archived {} files into {}",
        written.len(),
        archive_path.display()
    );
    Ok(written)
}

#[cfg(test)]
#[path = "archive_test.rs"]
mod tests;
