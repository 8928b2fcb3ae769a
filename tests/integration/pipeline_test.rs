// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{listing, mount_default_site, mount_page, search_service};
use gzcourt_notices::domain::models::notice::PageRange;
use gzcourt_notices::domain::models::session::{HeaderProfile, SearchSession};
use std::collections::HashSet;
use wiremock::MockServer;

fn session(keyword: &str, start: u32, end: u32) -> SearchSession {
    SearchSession::new(
        keyword,
        PageRange::new(start, end).unwrap(),
        HeaderProfile::new("integration-test/1.0", "en-US,en;q=0.9"),
    )
}

#[tokio::test]
async fn relative_links_are_resolved_against_site_origin() {
    let site = MockServer::start().await;
    mount_default_site(&site).await;

    let outcome = search_service(&site, 4)
        .search(&session("(2024)粤01", 1, 2))
        .await;

    assert_eq!(outcome.matches.len(), 1);
    let found = &outcome.matches[0];
    assert_eq!(found.page_index, 1);
    assert_eq!(found.notice.title, "(2024)粤01民初100号 送达公告");
    assert_eq!(found.notice.link, format!("{}/notice/100.html", site.uri()));
    assert_eq!(
        found.notice.source_page_url,
        format!("{}/other/ck601/index.html", site.uri())
    );
}

#[tokio::test]
async fn absolute_links_pass_through_unchanged() {
    let site = MockServer::start().await;
    mount_default_site(&site).await;

    let outcome = search_service(&site, 4)
        .search(&session("(2022)粤03", 1, 2))
        .await;

    assert_eq!(outcome.matches.len(), 1);
    assert_eq!(outcome.matches[0].page_index, 2);
    assert_eq!(outcome.matches[0].notice.link, "http://elsewhere.test/n/1.html");
}

#[tokio::test]
async fn server_error_page_is_excluded_while_others_contribute() {
    let site = MockServer::start().await;
    mount_default_site(&site).await;
    mount_page(
        &site,
        3,
        500,
        listing(&[("/notice/300.html", "第三页 送达公告")]),
    )
    .await;

    let outcome = search_service(&site, 4)
        .search(&session("送达公告", 1, 3))
        .await;

    let pages: HashSet<u32> = outcome.matches.iter().map(|m| m.page_index).collect();
    assert_eq!(pages, HashSet::from([1, 2]));
    assert_eq!(outcome.matches.len(), 3);
    assert_eq!(outcome.failed_pages, vec![3]);
}

#[tokio::test]
async fn missing_pages_yield_no_matches() {
    let site = MockServer::start().await;

    let outcome = search_service(&site, 2)
        .search(&session("送达公告", 1, 4))
        .await;

    assert!(outcome.matches.is_empty());
    assert_eq!(outcome.failed_pages.len(), 4);
}

#[tokio::test]
async fn keyword_filter_is_case_sensitive_substring() {
    let site = MockServer::start().await;
    mount_page(
        &site,
        1,
        200,
        listing(&[("/n/1.html", "Case 2024-001"), ("/n/2.html", "case 2024-002")]),
    )
    .await;
    let search = search_service(&site, 1);

    let by_number = search.search(&session("2024-001", 1, 1)).await;
    assert_eq!(by_number.matches.len(), 1);
    assert_eq!(by_number.matches[0].notice.title, "Case 2024-001");

    let upper = search.search(&session("CASE", 1, 1)).await;
    assert!(upper.matches.is_empty());
}

#[tokio::test]
async fn repeated_search_returns_same_set() {
    let site = MockServer::start().await;
    mount_default_site(&site).await;
    let search = search_service(&site, 4);

    let first: HashSet<_> = search
        .search(&session("送达公告", 1, 2))
        .await
        .matches
        .into_iter()
        .collect();
    let second: HashSet<_> = search
        .search(&session("送达公告", 1, 2))
        .await
        .matches
        .into_iter()
        .collect();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}
