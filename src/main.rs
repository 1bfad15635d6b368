use ban_sweep::core::ConfigProvider;
use ban_sweep::utils::{logger, validation::Validate};
use ban_sweep::{CliConfig, LocalStorage, RunSummary, SweepEngine, SweepError, SweepPipeline, TomlConfig};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    if config.json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting ban-sweep");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let json = config.json;
    match run(config).await {
        Ok(summary) => {
            if let Err(e) = report(&summary, json) {
                fail(&e);
            }
        }
        Err(e) => fail(&e),
    }
}

async fn run(mut config: CliConfig) -> Result<RunSummary, SweepError> {
    config.validate()?;
    config.resolve_now()?;

    match config.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut file_config = TomlConfig::from_file(&path)?;
            file_config.validate()?;
            if let Some(now) = ConfigProvider::now(&config) {
                file_config.set_now(now);
            }

            let monitor = config.monitor || file_config.monitoring_enabled();
            let storage = LocalStorage::new(file_config.output_dir().to_string());
            execute(SweepPipeline::new(storage, file_config), monitor).await
        }
        None => {
            let monitor = config.monitor;
            let storage = LocalStorage::new(config.output_dir.clone());
            execute(SweepPipeline::new(storage, config), monitor).await
        }
    }
}

async fn execute<C: ConfigProvider>(
    pipeline: SweepPipeline<LocalStorage, C>,
    monitor: bool,
) -> Result<RunSummary, SweepError> {
    if monitor {
        tracing::info!("🔍 System monitoring enabled");
    }
    SweepEngine::new_with_monitoring(pipeline, monitor).run().await
}

fn report(summary: &RunSummary, json: bool) -> Result<(), SweepError> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("Expired bans: {}", summary.expired_count);
    println!("Active bans: {}", summary.active_count);
    if summary.malformed_count > 0 {
        println!("Malformed lines: {}", summary.malformed_count);
    }
    if summary.skipped_count > 0 {
        println!("Skipped lines (unsupported format): {}", summary.skipped_count);
    }
    if summary.write_failures > 0 {
        println!("Failed writes: {}", summary.write_failures);
    }
    println!("Bans successfully processed!");
    Ok(())
}

fn fail(e: &SweepError) -> ! {
    tracing::error!(
        "❌ ban-sweep failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code())
}
