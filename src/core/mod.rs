pub mod classifier;
pub mod engine;
pub mod fetcher;
pub mod orchestrator;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{CheckResult, CheckTask, Existence, PlatformSpec, Verdict};
pub use crate::domain::ports::{ConfigProvider, Fetcher, Pipeline, ReportFormat, Storage};
pub use crate::utils::error::Result;
