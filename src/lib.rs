pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::batch_config::BatchConfig;
pub use config::cli::LocalStorage;
pub use config::AlphaJob;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{
    alpha::extract_alpha,
    batch::{plan, BatchReport, BatchRunner, JobStatus, PlannedJob},
    engine::{AlphaEngine, RunSummary},
    pipeline::TwoPassPipeline,
};
pub use utils::error::{AlphaError, Result};
