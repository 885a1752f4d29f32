use anyhow::{bail, Context};
use clap::Parser;
use pngalpha::utils::{logger, validation::Validate};
use pngalpha::{plan, AlphaJob, BatchConfig, BatchRunner, JobStatus, LocalStorage};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pngalpha-batch")]
#[command(about = "Extract transparent PNGs for every white/black pair listed in a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "pngalpha.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Write the JSON report here (overrides batch.report)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Dry run - list the jobs without processing them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = BatchConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting batch '{}' from {}", config.name(), args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        return Err(e).context("Invalid batch configuration");
    }

    let jobs = config.jobs();

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config, &jobs);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let runner = BatchRunner::new(LocalStorage::default(), config.continue_on_error())
        .with_monitoring(monitor_enabled);
    let report = runner.run(config.name(), &jobs).await;

    for job in &report.jobs {
        match job.status {
            JobStatus::Succeeded => println!("Transparent PNG file created: {}", job.output),
            JobStatus::Failed => eprintln!(
                "❌ {}: {}",
                job.white,
                job.error.as_deref().unwrap_or("unknown error")
            ),
            JobStatus::Skipped => eprintln!("⏭ {}: skipped", job.white),
        }
    }

    if let Some(report_path) = args.report.or_else(|| config.report_path()) {
        report
            .write_json(&report_path)
            .with_context(|| format!("Failed to write report to {}", report_path.display()))?;
        tracing::info!("📁 Report saved to: {}", report_path.display());
    }

    let failed = report.count(JobStatus::Failed);
    tracing::info!(
        "Batch finished: {} succeeded, {} failed, {} skipped",
        report.count(JobStatus::Succeeded),
        failed,
        report.count(JobStatus::Skipped)
    );

    if !report.is_success() {
        bail!(
            "{} of {} jobs did not complete",
            report.jobs.len() - report.count(JobStatus::Succeeded),
            report.jobs.len()
        );
    }

    Ok(())
}

fn perform_dry_run(config: &BatchConfig, jobs: &[AlphaJob]) {
    println!("🔍 Dry Run Analysis:");
    println!("  Batch: {}", config.name());
    println!("  Jobs: {}", jobs.len());
    println!("  Continue on error: {}", config.continue_on_error());
    println!();

    for planned in plan(jobs) {
        let job = &planned.job;
        let status = match &planned.problem {
            None => "ready".to_string(),
            Some(problem) => format!("will fail: {}", problem),
        };
        println!("  [{}] {} + {} -> {}", planned.index + 1, job.white, job.black, job.output);
        println!("      min_alpha={} ({})", job.options.min_alpha, status);
    }

    println!();
    println!("✅ Dry run analysis complete.");
}
