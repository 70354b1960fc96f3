use clap::{CommandFactory, Parser};
use handle_probe::utils::error::{ErrorSeverity, ProbeError};
use handle_probe::utils::{logger, validation::Validate};
use handle_probe::{CliConfig, LocalStorage, Orchestrator, ProbeEngine, ProbePipeline};

fn report_error(e: &ProbeError) {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting handle-probe CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置，未提供帳號時印出用法並在任何網路請求前結束
    if let Err(e) = config.validate() {
        report_error(&e);
        eprintln!();
        let _ = CliConfig::command().print_help();
        std::process::exit(1);
    }

    let probe_config = match config.probe_config() {
        Ok(probe_config) => probe_config,
        Err(e) => {
            report_error(&e);
            std::process::exit(1);
        }
    };

    if config.list_platforms {
        let markers = probe_config.table.markers();
        for platform in probe_config.table.platforms() {
            let marker_count = markers.get(&platform.key).map(Vec::len).unwrap_or(0);
            println!(
                "{:<18} {:?} {} ({} marker(s))",
                platform.key, platform.method, platform.url_template, marker_count
            );
        }
        return Ok(());
    }

    let orchestrator = Orchestrator::with_http(&probe_config)?;
    let pipeline = ProbePipeline::new(LocalStorage::default(), config, orchestrator);
    let engine = ProbeEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            println!(
                "✅ {} checks: {} found, {} not found, {} unknown",
                summary.total, summary.exists, summary.missing, summary.unknown
            );
            println!("📁 Output saved to: {}", summary.output_path);
        }
        Err(e) => {
            report_error(&e);

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
