#[cfg(feature = "cli")]
pub mod cli;
pub mod platforms;
pub mod probe;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use crate::config::platforms::{PlatformFile, PlatformTable};
    use crate::config::probe::{ProbeConfig, MAX_CONCURRENCY};
    use crate::core::{ConfigProvider, ReportFormat};
    use crate::utils::error::{ProbeError, Result};
    use crate::utils::validation::{validate_path, validate_range, Validate};
    use clap::Parser;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "handle-probe")]
    #[command(about = "Check whether usernames are registered on popular web platforms")]
    pub struct CliConfig {
        /// Username to check (repeatable, or comma separated)
        #[arg(short = 'u', long = "username", value_delimiter = ',')]
        pub usernames: Vec<String>,

        /// File with one username per line
        #[arg(short, long)]
        pub input: Option<String>,

        #[arg(short, long, default_value = "results.json")]
        pub output: String,

        #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
        pub format: ReportFormat,

        /// Maximum number of requests in flight
        #[arg(short, long, default_value = "8")]
        pub concurrency: usize,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "15")]
        pub timeout: f64,

        /// Retries after a timeout
        #[arg(long, default_value = "2")]
        pub retries: u32,

        /// Base backoff delay in seconds
        #[arg(long, default_value = "1.5")]
        pub backoff: f64,

        /// TOML file with extra or overriding platforms
        #[arg(long)]
        pub platform_config: Option<String>,

        /// Only check these platform keys
        #[arg(long, value_delimiter = ',')]
        pub platforms: Vec<String>,

        /// Print the platform table and exit
        #[arg(long)]
        pub list_platforms: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,
    }

    fn seconds(field: &str, value: f64) -> Result<Duration> {
        Duration::try_from_secs_f64(value).map_err(|e| ProbeError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
    }

    impl CliConfig {
        /// 組出平台表：預設值 → 外部設定檔 → `--platforms` 篩選
        pub fn platform_table(&self) -> Result<PlatformTable> {
            let mut table = PlatformTable::default();

            if let Some(path) = &self.platform_config {
                tracing::debug!("Loading platform config from: {}", path);
                table.merge(PlatformFile::from_file(path)?);
            }

            if !self.platforms.is_empty() {
                table.retain_keys(&self.platforms)?;
            }

            Ok(table)
        }

        pub fn probe_config(&self) -> Result<ProbeConfig> {
            let config = ProbeConfig::default()
                .with_table(self.platform_table()?)
                .with_concurrency(self.concurrency)
                .with_timeout(seconds("timeout", self.timeout)?)
                .with_retries(self.retries)
                .with_backoff_base(seconds("backoff", self.backoff)?);

            config.validate()?;
            Ok(config)
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if self.list_platforms {
                return Ok(());
            }

            if self.usernames.is_empty() && self.input.is_none() {
                return Err(ProbeError::MissingConfigError {
                    field: "--username or --input".to_string(),
                });
            }

            validate_path("output", &self.output)?;
            validate_range("concurrency", self.concurrency, 1, MAX_CONCURRENCY)?;
            Ok(())
        }
    }

    impl ConfigProvider for CliConfig {
        fn usernames(&self) -> &[String] {
            &self.usernames
        }

        fn input_path(&self) -> Option<&str> {
            self.input.as_deref()
        }

        fn output_path(&self) -> &str {
            &self.output
        }

        fn report_format(&self) -> ReportFormat {
            self.format
        }
    }

}
