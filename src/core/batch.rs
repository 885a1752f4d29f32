use crate::config::AlphaJob;
use crate::core::engine::AlphaEngine;
use crate::core::pipeline::TwoPassPipeline;
use crate::core::{AlphaStats, Storage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Succeeded,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub index: usize,
    pub white: String,
    pub black: String,
    pub output: String,
    pub status: JobStatus,
    pub stats: Option<AlphaStats>,
    pub error: Option<String>,
    pub duration_ms: u128,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub jobs: Vec<JobReport>,
}

impl BatchReport {
    pub fn count(&self, status: JobStatus) -> usize {
        self.jobs.iter().filter(|j| j.status == status).count()
    }

    pub fn is_success(&self) -> bool {
        self.jobs.iter().all(|j| j.status == JobStatus::Succeeded)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the pretty JSON report, creating missing parent directories.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// What a dry run would do with one job.
#[derive(Debug, Clone)]
pub struct PlannedJob {
    pub index: usize,
    pub job: AlphaJob,
    pub problem: Option<String>,
}

impl PlannedJob {
    pub fn is_ready(&self) -> bool {
        self.problem.is_none()
    }
}

/// Validates every job without decoding or writing anything.
pub fn plan(jobs: &[AlphaJob]) -> Vec<PlannedJob> {
    jobs.iter()
        .enumerate()
        .map(|(index, job)| PlannedJob {
            index,
            job: job.clone(),
            problem: job.validate().err().map(|e| e.user_friendly_message()),
        })
        .collect()
}

/// Runs jobs one after another, each through its own pipeline and engine.
pub struct BatchRunner<S: Storage + Clone> {
    storage: S,
    continue_on_error: bool,
    monitor_enabled: bool,
}

impl<S: Storage + Clone> BatchRunner<S> {
    pub fn new(storage: S, continue_on_error: bool) -> Self {
        Self {
            storage,
            continue_on_error,
            monitor_enabled: false,
        }
    }

    pub fn with_monitoring(mut self, enabled: bool) -> Self {
        self.monitor_enabled = enabled;
        self
    }

    async fn run_job(&self, job: &AlphaJob) -> Result<AlphaStats> {
        job.validate()?;

        let pipeline = TwoPassPipeline::new(self.storage.clone(), job.clone());
        let engine = AlphaEngine::new_with_monitoring(pipeline, self.monitor_enabled);
        let summary = engine.run().await?;

        Ok(summary.stats)
    }

    pub async fn run(&self, name: &str, jobs: &[AlphaJob]) -> BatchReport {
        let started_at = Utc::now();
        let mut reports = Vec::with_capacity(jobs.len());
        let mut halted = false;

        for (index, job) in jobs.iter().enumerate() {
            let mut report = JobReport {
                index,
                white: job.white.clone(),
                black: job.black.clone(),
                output: job.output.clone(),
                status: JobStatus::Skipped,
                stats: None,
                error: None,
                duration_ms: 0,
            };

            if halted {
                reports.push(report);
                continue;
            }

            tracing::info!("▶ [{}/{}] {} + {}", index + 1, jobs.len(), job.white, job.black);
            let start = Instant::now();

            match self.run_job(job).await {
                Ok(stats) => {
                    tracing::info!("✅ [{}/{}] {}", index + 1, jobs.len(), job.output);
                    report.status = JobStatus::Succeeded;
                    report.stats = Some(stats);
                }
                Err(e) => {
                    tracing::error!(
                        "❌ [{}/{}] failed: {} (Category: {:?})",
                        index + 1,
                        jobs.len(),
                        e,
                        e.category()
                    );
                    report.status = JobStatus::Failed;
                    report.error = Some(e.user_friendly_message());

                    if !self.continue_on_error {
                        tracing::warn!("Stopping batch after first failure");
                        halted = true;
                    }
                }
            }

            report.duration_ms = start.elapsed().as_millis();
            reports.push(report);
        }

        BatchReport {
            name: name.to_string(),
            started_at,
            finished_at: Utc::now(),
            jobs: reports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(status: JobStatus) -> JobReport {
        JobReport {
            index: 0,
            white: "w.png".to_string(),
            black: "b.png".to_string(),
            output: "o.png".to_string(),
            status,
            stats: None,
            error: None,
            duration_ms: 1,
        }
    }

    #[test]
    fn test_report_counts_and_json() {
        let now = Utc::now();
        let batch = BatchReport {
            name: "demo".to_string(),
            started_at: now,
            finished_at: now,
            jobs: vec![
                report(JobStatus::Succeeded),
                report(JobStatus::Failed),
                report(JobStatus::Skipped),
            ],
        };

        assert_eq!(batch.count(JobStatus::Succeeded), 1);
        assert_eq!(batch.count(JobStatus::Failed), 1);
        assert!(!batch.is_success());

        let json: serde_json::Value = serde_json::from_str(&batch.to_json().unwrap()).unwrap();
        assert_eq!(json["name"], "demo");
        assert_eq!(json["jobs"][1]["status"], "failed");
        assert_eq!(json["jobs"][2]["status"], "skipped");
    }
}
