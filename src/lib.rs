pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use config::{platforms::PlatformTable, probe::ProbeConfig};
pub use core::{
    engine::{ProbeEngine, RunSummary},
    orchestrator::Orchestrator,
    pipeline::ProbePipeline,
};
pub use utils::error::{ProbeError, Result};
