use crate::domain::model::{CheckResult, HttpMethod};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
}

pub trait ConfigProvider: Send + Sync {
    fn usernames(&self) -> &[String];
    fn input_path(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn report_format(&self) -> ReportFormat;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// 單次請求的失敗，只有 `Timeout` 會觸發重試
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),
}

/// 原始 HTTP 傳輸。重試與併發限制由上層處理
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(
        &self,
        url: &str,
        method: HttpMethod,
    ) -> std::result::Result<FetchResponse, FetchError>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<String>>;
    async fn transform(&self, usernames: Vec<String>) -> Result<Vec<CheckResult>>;
    async fn load(&self, results: Vec<CheckResult>) -> Result<String>;
}
