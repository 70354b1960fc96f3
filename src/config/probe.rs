use crate::config::platforms::PlatformTable;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    concat!("handle-probe/", env!("CARGO_PKG_VERSION"), " (username availability check)");

/// 同時進行請求數的上限
pub const MAX_CONCURRENCY: usize = 1024;

/// 單次執行的完整設定，建構 orchestrator 時明確傳入
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub table: PlatformTable,
    pub concurrency: usize,
    pub timeout: Duration,
    pub retries: u32,
    pub backoff_base: Duration,
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            table: PlatformTable::default(),
            concurrency: 8,
            timeout: Duration::from_secs(15),
            retries: 2,
            backoff_base: Duration::from_millis(1500),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ProbeConfig {
    pub fn with_table(mut self, table: PlatformTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }
}

impl Validate for ProbeConfig {
    fn validate(&self) -> Result<()> {
        validate_range("concurrency", self.concurrency, 1, MAX_CONCURRENCY)?;
        validate_range("retries", self.retries, 0, 10)?;
        validate_range("timeout", self.timeout.as_secs_f64(), 0.001, 300.0)?;
        validate_range("backoff", self.backoff_base.as_secs_f64(), 0.0, 60.0)?;
        self.table.validate()
    }
}
