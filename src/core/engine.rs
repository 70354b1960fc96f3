use crate::core::{CheckResult, Pipeline};
use crate::domain::model::Existence;
use crate::utils::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: String,
    pub total: usize,
    pub exists: usize,
    pub missing: usize,
    pub unknown: usize,
}

impl RunSummary {
    fn tally(output_path: String, results: &[CheckResult]) -> Self {
        let count = |state: Existence| results.iter().filter(|r| r.exists == state).count();
        Self {
            output_path,
            total: results.len(),
            exists: count(Existence::Exists),
            missing: count(Existence::Missing),
            unknown: count(Existence::Unknown),
        }
    }
}

pub struct ProbeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ProbeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting username probe");

        // Extract
        let usernames = self.pipeline.extract().await?;
        tracing::info!("👤 Collected {} unique username(s)", usernames.len());

        // Transform
        let results = self.pipeline.transform(usernames).await?;

        let summary = RunSummary::tally(String::new(), &results);
        tracing::info!(
            "✅ {} checks: {} found, {} not found, {} unknown",
            summary.total,
            summary.exists,
            summary.missing,
            summary.unknown
        );

        // Load
        let output_path = self.pipeline.load(results).await?;
        tracing::info!("📁 Report saved to: {}", output_path);

        Ok(RunSummary {
            output_path,
            ..summary
        })
    }
}
