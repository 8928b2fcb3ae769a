// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 关键字输入：JSON数组，或每行（空白分隔）一个关键字的文本
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum KeywordsInput {
    List(Vec<String>),
    Text(String),
}

impl KeywordsInput {
    /// 规范化后的关键字列表，保持输入顺序
    ///
    /// 文本按任意空白切分；数组中的每一项去掉首尾空白，空项丢弃
    pub fn to_list(&self) -> Vec<String> {
        match self {
            KeywordsInput::List(items) => items
                .iter()
                .map(|k| k.trim())
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
            KeywordsInput::Text(text) => text.split_whitespace().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[validate(schema(function = "validate_page_order"))]
pub struct SearchRequestDto {
    #[validate(custom(function = "validate_keywords"))]
    pub keywords: KeywordsInput,
    #[validate(range(min = 1, message = "start_page must be at least 1"))]
    pub start_page: u32,
    #[validate(range(min = 1, message = "end_page must be at least 1"))]
    pub end_page: u32,
}

impl SearchRequestDto {
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords.to_list()
    }
}

/// 表单提交的数据（`application/x-www-form-urlencoded`）
#[derive(Debug, Clone, Deserialize)]
pub struct SearchFormDto {
    pub keywords: String,
    pub start_page: u32,
    pub end_page: u32,
}

impl From<SearchFormDto> for SearchRequestDto {
    fn from(form: SearchFormDto) -> Self {
        Self {
            keywords: KeywordsInput::Text(form.keywords),
            start_page: form.start_page,
            end_page: form.end_page,
        }
    }
}

fn validate_keywords(keywords: &KeywordsInput) -> Result<(), ValidationError> {
    if keywords.to_list().is_empty() {
        return Err(ValidationError::new("keywords_required")
            .with_message("at least one keyword is required".into()));
    }
    Ok(())
}

fn validate_page_order(dto: &SearchRequestDto) -> Result<(), ValidationError> {
    if dto.end_page < dto.start_page {
        return Err(ValidationError::new("page_order")
            .with_message("end_page must not be less than start_page".into()));
    }
    Ok(())
}
