// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use rand::seq::IndexedRandom;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

use crate::domain::models::notice::PageRange;

/// 一次搜索会话使用的请求头
///
/// 会话开始时选定，之后该会话的所有页面请求都复用同一组请求头
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderProfile {
    pub user_agent: String,
    pub accept_language: String,
}

impl HeaderProfile {
    pub fn new(user_agent: impl Into<String>, accept_language: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            accept_language: accept_language.into(),
        }
    }

    /// 从候选池中随机选取一个 User-Agent
    ///
    /// 候选池为空时返回 `None`
    pub fn pick<R: Rng + ?Sized>(
        user_agents: &[String],
        accept_language: &str,
        rng: &mut R,
    ) -> Option<Self> {
        user_agents
            .choose(rng)
            .map(|ua| Self::new(ua.clone(), accept_language))
    }

    pub fn to_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        headers.insert("Accept-Language".to_string(), self.accept_language.clone());
        headers
    }
}

/// 单个关键字的搜索会话
///
/// 持有关键字、页码范围、请求头，以及该关键字下生成的文件名列表
#[derive(Debug, Clone)]
pub struct SearchSession {
    keyword: String,
    range: PageRange,
    headers: HeaderProfile,
    file_stem: String,
    artifacts: Vec<String>,
}

impl SearchSession {
    pub fn new(keyword: impl Into<String>, range: PageRange, headers: HeaderProfile) -> Self {
        let keyword = keyword.into();
        let file_stem = sanitize_file_component(&keyword);
        Self {
            keyword,
            range,
            headers,
            file_stem,
            artifacts: Vec::new(),
        }
    }

    /// 使用由 [`FileStemAllocator`] 分配的文件名前缀
    pub fn with_file_stem(mut self, file_stem: impl Into<String>) -> Self {
        self.file_stem = file_stem.into();
        self
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn range(&self) -> PageRange {
        self.range
    }

    pub fn headers(&self) -> &HeaderProfile {
        &self.headers
    }

    /// 关键字在文件名中的安全形式
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    /// 已记录的生成文件名（按生成顺序，可能重复）
    pub fn artifacts(&self) -> &[String] {
        &self.artifacts
    }

    pub fn record_artifact(&mut self, file_name: impl Into<String>) {
        self.artifacts.push(file_name.into());
    }
}

/// 文件名前缀的最大字节数
///
/// 加上最长的后缀（`_notice_{u32}.pdf`）或报告前缀后仍低于常见文件系统的 255 字节上限
pub const MAX_FILE_STEM_BYTES: usize = 96;

/// 把关键字转换为可以安全用作文件名一部分的字符串
///
/// 路径分隔符和控制字符替换为 `_`，其余字符（包括中文和括号）保持不变。
/// 超过 [`MAX_FILE_STEM_BYTES`] 时在字符边界截断，并追加原关键字的短摘要以区分前缀相同的关键字
pub fn sanitize_file_component(value: &str) -> String {
    let cleaned: String = value
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() {
        return "_".to_string();
    }
    if cleaned.len() <= MAX_FILE_STEM_BYTES {
        return cleaned;
    }

    let digest = hex::encode(&Sha256::digest(value.as_bytes())[..4]);
    let mut cut = MAX_FILE_STEM_BYTES - digest.len() - 1;
    while !cleaned.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}~{}", &cleaned[..cut], digest)
}

/// 为一次运行中的关键字分配互不相同的文件名前缀
///
/// 不同关键字清理后可能得到相同的前缀（如 `a/b` 与 `a_b`），后出现的依次追加 `_2`、`_3`
#[derive(Debug, Default)]
pub struct FileStemAllocator {
    used: HashSet<String>,
}

impl FileStemAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, keyword: &str) -> String {
        let base = sanitize_file_component(keyword);
        let mut stem = base.clone();
        let mut n = 2u32;
        while !self.used.insert(stem.clone()) {
            stem = format!("{}_{}", base, n);
            n += 1;
        }
        stem
    }
}
