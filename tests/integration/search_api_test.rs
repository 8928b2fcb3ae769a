// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use gzcourt_notices::application::dto::run_summary::RunSummary;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn json_search_produces_report_pdfs_and_archive() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/search")
        .json(&json!({
            "keywords": ["(2024)粤01"],
            "start_page": 1,
            "end_page": 2
        }))
        .await;

    response.assert_status_ok();
    let summary: RunSummary = response.json();
    assert_eq!(summary.keywords.len(), 1);

    let keyword = &summary.keywords[0];
    assert_eq!(keyword.keyword, "(2024)粤01");
    assert_eq!(keyword.notices.len(), 1);
    assert_eq!(keyword.notices[0].page_index, 1);
    assert_eq!(
        keyword.notices[0].notice.link,
        format!("{}/notice/100.html", app.site.uri())
    );
    assert_eq!(keyword.report.file_name, "delivery_notices_(2024)粤01.docx");
    let pdfs: Vec<&str> = keyword.artifacts.iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(pdfs, vec!["(2024)粤01_page_1.pdf", "(2024)粤01_notice_1.pdf"]);
    assert_eq!(app.renderer.rendered().len(), 2);

    let report = app.server.get(&keyword.report.download_url).await;
    report.assert_status_ok();
    let disposition = report.header("content-disposition");
    assert!(disposition.to_str().unwrap().starts_with("attachment"));
    assert!(report.as_bytes().starts_with(b"PK"));

    let pdf = app.server.get(&keyword.artifacts[0].download_url).await;
    pdf.assert_status_ok();
    assert_eq!(pdf.header("content-type"), "application/pdf");
    assert!(pdf.as_bytes().starts_with(b"%PDF"));

    let archive = app.server.get(&summary.archive.download_url).await;
    archive.assert_status_ok();
    assert_eq!(archive.header("content-type"), "application/zip");
}

#[tokio::test]
async fn json_search_without_matches_has_only_report() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/search")
        .json(&json!({
            "keywords": "(1999)粤99",
            "start_page": 1,
            "end_page": 2
        }))
        .await;

    response.assert_status_ok();
    let summary: RunSummary = response.json();
    let keyword = &summary.keywords[0];
    assert!(keyword.notices.is_empty());
    assert!(keyword.artifacts.is_empty());
    assert!(app.renderer.rendered().is_empty());

    let mut files: Vec<String> =
        std::fs::read_dir(app.output.path().join(summary.run_id.to_string()))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
    files.sort();
    assert_eq!(
        files,
        vec!["all_generated_files.zip", "delivery_notices_(1999)粤99.docx"]
    );
}

#[tokio::test]
async fn json_search_rejects_invalid_input() {
    let app = create_test_app().await;

    for body in [
        json!({ "keywords": [], "start_page": 1, "end_page": 2 }),
        json!({ "keywords": "k", "start_page": 0, "end_page": 2 }),
        json!({ "keywords": "k", "start_page": 3, "end_page": 2 }),
    ] {
        let response = app.server.post("/v1/search").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let error: serde_json::Value = response.json();
        assert!(error["error"].is_string());
    }
}

#[tokio::test]
async fn form_search_returns_download_page() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/search")
        .form(&[
            ("keywords", "(2024)粤01\r\n(2022)粤03"),
            ("start_page", "1"),
            ("end_page", "2"),
        ])
        .await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("查询完成"));
    assert!(page.contains("all_generated_files.zip"));
    assert!(page.contains("delivery_notices_(2024)粤01.docx"));
    assert!(page.contains("delivery_notices_(2022)粤03.docx"));
    assert_eq!(page.matches("/v1/runs/").count(), 7);
}

#[tokio::test]
async fn form_search_with_reversed_range_shows_error_page() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/search")
        .form(&[("keywords", "k"), ("start_page", "5"), ("end_page", "1")])
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.text().contains("输入有误"));
}

#[tokio::test]
async fn download_of_unknown_run_or_file_is_404() {
    let app = create_test_app().await;

    let unknown_run = app
        .server
        .get(&format!("/v1/runs/{}/files/a.pdf", Uuid::new_v4()))
        .await;
    assert_eq!(unknown_run.status_code(), StatusCode::NOT_FOUND);

    let response = app
        .server
        .post("/v1/search")
        .json(&json!({ "keywords": "k", "start_page": 1, "end_page": 1 }))
        .await;
    let summary: RunSummary = response.json();

    let unknown_file = app
        .server
        .get(&format!("/v1/runs/{}/files/missing.pdf", summary.run_id))
        .await;
    assert_eq!(unknown_file.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn download_rejects_path_components() {
    let app = create_test_app().await;
    std::fs::write(app.output.path().join("secret.txt"), b"secret").unwrap();

    let traversal = app
        .server
        .get(&format!("/v1/runs/{}/files/..%2Fsecret.txt", Uuid::new_v4()))
        .await;
    assert_eq!(traversal.status_code(), StatusCode::BAD_REQUEST);

    let bad_run = app.server.get("/v1/runs/..%2F..%2Ftmp/files/secret.txt").await;
    assert_eq!(bad_run.status_code(), StatusCode::BAD_REQUEST);
}
