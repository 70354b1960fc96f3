use crate::config::probe::ProbeConfig;
use crate::domain::model::HttpMethod;
use crate::domain::ports::{FetchError, FetchResponse, Fetcher};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// reqwest 實作：固定 User-Agent、每次嘗試的總逾時、自動跟隨轉址
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(err.to_string())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        method: HttpMethod,
    ) -> std::result::Result<FetchResponse, FetchError> {
        let response = self
            .client
            .request(method.into(), url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(FetchResponse { status, body })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub base: Duration,
}

impl RetryPolicy {
    /// 第 `attempt` 次（從 0 起算）失敗後的等待時間：`base * (attempt + 1)`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base * (attempt + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub status: Option<u16>,
    pub body: Option<String>,
    pub attempts: u32,
}

impl FetchOutcome {
    fn failed(attempts: u32) -> Self {
        Self {
            status: None,
            body: None,
            attempts,
        }
    }
}

/// 以 semaphore 限制同時進行的請求數，並只對逾時重試。
///
/// 每次嘗試前取得 permit、拿到回應或錯誤後立即釋放；退避等待期間不佔用 permit。
#[derive(Clone)]
pub struct BoundedFetcher {
    inner: Arc<dyn Fetcher>,
    semaphore: Arc<Semaphore>,
    policy: RetryPolicy,
}

impl BoundedFetcher {
    pub fn new(inner: Arc<dyn Fetcher>, max_in_flight: usize, policy: RetryPolicy) -> Self {
        Self {
            inner,
            semaphore: Arc::new(Semaphore::new(max_in_flight)),
            policy,
        }
    }

    pub async fn fetch(&self, url: &str, method: HttpMethod) -> FetchOutcome {
        let mut attempt: u32 = 0;

        loop {
            let result = {
                let Ok(_permit) = self.semaphore.acquire().await else {
                    return FetchOutcome::failed(attempt + 1);
                };
                self.inner.fetch(url, method).await
            };

            match result {
                Ok(response) => {
                    return FetchOutcome {
                        status: Some(response.status),
                        body: Some(response.body),
                        attempts: attempt + 1,
                    };
                }
                Err(FetchError::Timeout) if attempt < self.policy.retries => {
                    let delay = self.policy.delay_for(attempt);
                    tracing::debug!(
                        "⏳ Timeout on {} (attempt {}/{}), retrying in {:?}",
                        url,
                        attempt + 1,
                        self.policy.retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::debug!("⚠️ Request to {} failed: {}", url, err);
                    return FetchOutcome::failed(attempt + 1);
                }
            }
        }
    }
}
