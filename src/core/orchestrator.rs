use crate::config::probe::{ProbeConfig, MAX_CONCURRENCY};
use crate::core::classifier::Classifier;
use crate::core::fetcher::{BoundedFetcher, HttpFetcher, RetryPolicy};
use crate::domain::model::{CheckResult, Existence, PlatformSpec, Verdict};
use crate::domain::ports::Fetcher;
use crate::domain::services::{build_tasks, dedupe_usernames};
use crate::utils::error::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

/// 把 username × platform 展開成獨立任務，每組一個 tokio task。
///
/// 同時進行的請求數只由 `BoundedFetcher` 的 semaphore 限制，退避中的任務不佔 permit，
/// 其他任務可以繼續執行。分類在 permit 之外完成，結果經 channel 依完成順序收集。
/// 每個任務保證產出一筆結果。
pub struct Orchestrator {
    platforms: Vec<PlatformSpec>,
    classifier: Arc<Classifier>,
    fetcher: BoundedFetcher,
    concurrency: usize,
}

impl Orchestrator {
    pub fn new(config: &ProbeConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        let policy = RetryPolicy {
            retries: config.retries,
            base: config.backoff_base,
        };
        let concurrency = config.concurrency.clamp(1, MAX_CONCURRENCY);

        Self {
            platforms: config.table.platforms().to_vec(),
            classifier: Arc::new(Classifier::new(config.table.markers().clone())),
            fetcher: BoundedFetcher::new(fetcher, concurrency, policy),
            concurrency,
        }
    }

    pub fn with_http(config: &ProbeConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }

    pub fn platforms(&self) -> &[PlatformSpec] {
        &self.platforms
    }

    pub async fn run(&self, usernames: &[String]) -> Vec<CheckResult> {
        let usernames = dedupe_usernames(usernames);
        let tasks = build_tasks(&usernames, &self.platforms);
        let total = tasks.len();

        if total == 0 {
            tracing::warn!(
                "No tasks to run (usernames: {}, platforms: {})",
                usernames.len(),
                self.platforms.len()
            );
            return Vec::new();
        }

        tracing::info!(
            "🔎 Checking {} username(s) across {} platform(s) ({} requests, concurrency {})",
            usernames.len(),
            self.platforms.len(),
            total,
            self.concurrency
        );

        let (tx, mut rx) = mpsc::channel::<(usize, CheckResult)>(self.concurrency.min(total));

        let mut handles = Vec::with_capacity(total);
        for (index, task) in tasks.iter().cloned().enumerate() {
            let tx = tx.clone();
            let fetcher = self.fetcher.clone();
            let classifier = Arc::clone(&self.classifier);

            handles.push(tokio::spawn(async move {
                let outcome = fetcher.fetch(&task.url, task.method).await;
                let verdict =
                    classifier.classify(&task.platform, outcome.status, outcome.body.as_deref());
                let result = CheckResult::from_task(task, outcome.status, verdict);

                if tx.send((index, result)).await.is_err() {
                    tracing::trace!("collector gone, dropping result {}", index);
                }
            }));
        }
        drop(tx);

        let mut results = Vec::with_capacity(total);
        let mut completed = vec![false; total];
        let step = (total / 10).max(1);

        while let Some((index, result)) = rx.recv().await {
            tracing::debug!(
                "{} @ {}: exists={} status={:?} {}",
                result.username,
                result.platform,
                result.exists,
                result.http_status,
                result.note
            );
            completed[index] = true;
            results.push(result);

            let done = results.len();
            if done % step == 0 || done == total {
                tracing::info!(
                    "📊 Progress: {}/{} ({:.0}%)",
                    done,
                    total,
                    done as f64 * 100.0 / total as f64
                );
            }
        }

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("❌ Check task terminated abnormally: {}", e);
            }
        }

        // 異常結束的任務補上結果
        for (task, done) in tasks.into_iter().zip(completed) {
            if !done {
                tracing::warn!("Task {} @ {} produced no result", task.username, task.platform);
                let verdict = Verdict::new(Existence::Unknown, "task_dropped");
                results.push(CheckResult::from_task(task, None, verdict));
            }
        }

        results
    }
}
