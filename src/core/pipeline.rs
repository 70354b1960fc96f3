use crate::core::orchestrator::Orchestrator;
use crate::core::report;
use crate::core::{CheckResult, ConfigProvider, Pipeline, Storage};
use crate::domain::services::{dedupe_usernames, parse_username_lines};
use crate::utils::error::{ProbeError, Result};

/// extract: 收集帳號 → transform: 併發探測與分類 → load: 輸出報告
pub struct ProbePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    orchestrator: Orchestrator,
}

impl<S: Storage, C: ConfigProvider> ProbePipeline<S, C> {
    pub fn new(storage: S, config: C, orchestrator: Orchestrator) -> Self {
        Self {
            storage,
            config,
            orchestrator,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ProbePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<String>> {
        let mut raw: Vec<String> = self.config.usernames().to_vec();

        if let Some(input_path) = self.config.input_path() {
            tracing::debug!("Reading usernames from: {}", input_path);
            let data = self.storage.read_file(input_path).await?;
            let content = String::from_utf8_lossy(&data);
            raw.extend(parse_username_lines(&content));
        } else if raw.is_empty() {
            return Err(ProbeError::MissingConfigError {
                field: "--username or --input".to_string(),
            });
        }

        let usernames = dedupe_usernames(&raw);
        if usernames.is_empty() {
            return Err(ProbeError::config("No usernames found in the given input"));
        }

        tracing::debug!("Collected {} unique username(s)", usernames.len());
        Ok(usernames)
    }

    async fn transform(&self, usernames: Vec<String>) -> Result<Vec<CheckResult>> {
        Ok(self.orchestrator.run(&usernames).await)
    }

    async fn load(&self, results: Vec<CheckResult>) -> Result<String> {
        let output_path = self.config.output_path().to_string();
        let data = report::render(&results, self.config.report_format())?;

        tracing::debug!("Writing report ({} bytes) to storage", data.len());
        self.storage.write_file(&output_path, &data).await?;

        Ok(output_path)
    }
}
