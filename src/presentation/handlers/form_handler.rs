// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::response::Html;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::application::dto::run_summary::RunSummary;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="utf-8">
<title>送达公告查询</title>
</head>
<body>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

const SEARCH_FORM: &str = r#"<h1>送达公告查询</h1>
<form method="post" action="/search">
  <p><label for="keywords">案号（每行一个）</label></p>
  <p><textarea id="keywords" name="keywords" rows="8" cols="40" required></textarea></p>
  <p>
    <label for="start_page">起始页</label>
    <input id="start_page" name="start_page" type="number" min="1" value="1" required>
    <label for="end_page">结束页</label>
    <input id="end_page" name="end_page" type="number" min="1" value="1" required>
  </p>
  <p><button type="submit">查询</button></p>
</form>
"#;

/// 输入表单页面
pub async fn index() -> Html<String> {
    Html(format!("{}{}{}", PAGE_HEAD, SEARCH_FORM, PAGE_TAIL))
}

/// 渲染搜索完成后的结果页面，列出所有下载链接
pub fn render_results(summary: &RunSummary) -> String {
    let mut body = String::from("<h1>查询完成</h1>\n<p>文件已生成，请点击下载。</p>\n<ul>\n");

    for link in summary.downloads() {
        body.push_str(&format!(
            "  <li><a href=\"{}\">{}</a></li>\n",
            encode_double_quoted_attribute(&link.download_url),
            encode_text(&link.file_name)
        ));
    }
    body.push_str("</ul>\n<p><a href=\"/\">返回</a></p>\n");

    format!("{}{}{}", PAGE_HEAD, body, PAGE_TAIL)
}

/// 输入有误时的提示页面
pub fn render_error(message: &str) -> String {
    format!(
        "{}<h1>输入有误</h1>\n<p>{}</p>\n<p><a href=\"/\">返回</a></p>\n{}",
        PAGE_HEAD,
        encode_text(message),
        PAGE_TAIL
    )
}
