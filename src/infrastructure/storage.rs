// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::path::{Component, Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::config::settings::StorageSettings;
use crate::utils::errors::ArtifactError;

/// 本地运行目录存储
///
/// 每次运行在 `output_dir` 下拥有一个以运行ID命名的目录，
/// 所有报告、PDF和压缩包都写在这个目录中。
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    base_path: PathBuf,
}

impl ArtifactStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(&settings.output_dir)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn run_dir(&self, run_id: &Uuid) -> PathBuf {
        self.base_path.join(run_id.to_string())
    }

    /// 为一次运行创建目录（包括缺失的上级目录）
    pub async fn create_run_dir(&self, run_id: &Uuid) -> Result<PathBuf, ArtifactError> {
        let dir = self.run_dir(run_id);
        fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    /// 把下载请求中的运行ID和文件名解析为磁盘路径
    ///
    /// # 返回值
    ///
    /// * `Ok(PathBuf)` - 存在的文件路径
    /// * `Err(ArtifactError::InvalidName)` - 运行ID不是UUID，或文件名包含路径成分
    /// * `Err(ArtifactError::NotFound)` - 运行目录或文件不存在
    pub async fn resolve(&self, run_id: &str, file_name: &str) -> Result<PathBuf, ArtifactError> {
        let run_id = Uuid::parse_str(run_id)
            .map_err(|_| ArtifactError::InvalidName(format!("run id {}", run_id)))?;

        if !is_plain_file_name(file_name) {
            return Err(ArtifactError::InvalidName(file_name.to_string()));
        }

        let path = self.run_dir(&run_id).join(file_name);
        if fs::try_exists(&path).await? && fs::metadata(&path).await?.is_file() {
            Ok(path)
        } else {
            Err(ArtifactError::NotFound(format!("{}/{}", run_id, file_name)))
        }
    }
}

/// 文件名只能是单个普通路径成分
fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// 文件是否存在于目录中
pub async fn artifact_exists(dir: &Path, file_name: &str) -> bool {
    fs::try_exists(dir.join(file_name)).await.unwrap_or(false)
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
