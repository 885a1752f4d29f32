use clap::Parser;
use pngalpha::utils::{logger, validation::Validate};
use pngalpha::{AlphaEngine, CliConfig, LocalStorage, TwoPassPipeline};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let job = config.to_job();
    let pipeline = TwoPassPipeline::new(LocalStorage::default(), job);
    let engine = AlphaEngine::new_with_monitoring(pipeline, config.monitor);

    match engine.run().await {
        Ok(summary) => {
            println!("Transparent PNG file created: {}", summary.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Alpha extraction failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
