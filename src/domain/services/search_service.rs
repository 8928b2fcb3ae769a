// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::domain::models::notice::MatchResult;
use crate::domain::models::session::SearchSession;
use crate::domain::services::page_fetcher::PageFetcher;

/// 一次关键字搜索的汇总结果
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// 命中结果，按任务完成顺序排列（不保证页码有序）
    pub matches: Vec<MatchResult>,
    /// 成功抓取的页数
    pub pages_scanned: usize,
    /// 抓取失败的页码（按失败先后顺序）
    pub failed_pages: Vec<u32>,
}

enum PageStatus {
    Fetched,
    Failed(u32),
}

/// 并行搜索编排器
///
/// 为页码范围内的每一页提交一个抓取任务，由信号量限制同时进行的请求数。
/// 每个任务把本页的命中结果整体发送到通道；全部任务结束后再统一取出，
/// 因此结果顺序就是任务完成顺序。单页失败只记录日志，不影响整体搜索。
pub struct SearchService {
    fetcher: Arc<PageFetcher>,
    max_workers: usize,
}

impl SearchService {
    pub fn new(fetcher: Arc<PageFetcher>, max_workers: usize) -> Self {
        Self {
            fetcher,
            max_workers: max_workers.max(1),
        }
    }

    /// 在会话的页码范围内搜索关键字
    ///
    /// # 参数
    ///
    /// * `session` - 搜索会话，提供关键字、页码范围和请求头
    ///
    /// # 返回值
    ///
    /// 所有任务完成后的汇总结果；此方法本身不会失败
    pub async fn search(&self, session: &SearchSession) -> SearchOutcome {
        let range = session.range();
        let keyword: Arc<str> = Arc::from(session.keyword());
        let headers = Arc::new(session.headers().clone());
        let permits = Arc::new(Semaphore::new(self.max_workers));
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<MatchResult>>();

        info!(
            "Searching '{}' across pages {}-{} with {} workers",
            keyword,
            range.start(),
            range.end(),
            self.max_workers.min(range.page_count())
        );

        let mut workers = JoinSet::new();
        for task in range.tasks() {
            let fetcher = self.fetcher.clone();
            let keyword = keyword.clone();
            let headers = headers.clone();
            let permits = permits.clone();
            let tx = tx.clone();

            workers.spawn(async move {
                // The semaphore is never closed, so acquiring only fails if it were.
                let _permit = permits.acquire_owned().await.ok();

                match fetcher.fetch_page(task.page_index, &headers, &keyword).await {
                    Ok(matches) => {
                        if !matches.is_empty() {
                            let _ = tx.send(matches);
                        }
                        PageStatus::Fetched
                    }
                    Err(e) => {
                        warn!(
                            "Failed to fetch page {} for '{}': {}",
                            task.page_index, keyword, e
                        );
                        PageStatus::Failed(task.page_index)
                    }
                }
            });
        }
        drop(tx);

        let mut outcome = SearchOutcome::default();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(PageStatus::Fetched) => outcome.pages_scanned += 1,
                Ok(PageStatus::Failed(page_index)) => outcome.failed_pages.push(page_index),
                Err(e) => error!("Page worker for '{}' aborted: {}", keyword, e),
            }
        }

        // Every worker has finished; the channel now holds all batches in completion order.
        while let Ok(batch) = rx.try_recv() {
            outcome.matches.extend(batch);
        }

        info!(
            "Search '{}' finished: {} matches, {} pages scanned, {} pages failed",
            keyword,
            outcome.matches.len(),
            outcome.pages_scanned,
            outcome.failed_pages.len()
        );

        outcome
    }
}

#[cfg(test)]
#[path = "search_service_test.rs"]
mod tests;
