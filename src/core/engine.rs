use crate::core::{AlphaStats, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub stats: AlphaStats,
}

pub struct AlphaEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AlphaEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Loading input images...");
        let pair = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded white {}x{} and black {}x{}",
            pair.on_white.width(),
            pair.on_white.height(),
            pair.on_black.width(),
            pair.on_black.height()
        );
        self.monitor.log_stats("Load");

        tracing::info!("Extracting alpha channel...");
        let output = self.pipeline.transform(pair).await?;
        tracing::info!(
            "Mean alpha {:.3} ({} opaque / {} partial / {} transparent)",
            output.stats.mean_alpha,
            output.stats.opaque_pixels,
            output.stats.partial_pixels,
            output.stats.transparent_pixels
        );
        self.monitor.log_stats("Extract");

        tracing::info!("Writing transparent PNG...");
        let output_path = self.pipeline.load(&output).await?;
        self.monitor.log_stats("Save");
        self.monitor.log_final_stats();

        Ok(RunSummary {
            output_path,
            stats: output.stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AlphaOutput, ImagePair};
    use crate::utils::error::AlphaError;
    use image::{RgbImage, RgbaImage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingPipeline {
        fail_transform: bool,
        loads: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Pipeline for CountingPipeline {
        async fn extract(&self) -> Result<ImagePair> {
            Ok(ImagePair {
                on_white: RgbImage::new(2, 2),
                on_black: RgbImage::new(2, 2),
            })
        }

        async fn transform(&self, pair: ImagePair) -> Result<AlphaOutput> {
            if self.fail_transform {
                return Err(AlphaError::ProcessingError {
                    message: "boom".to_string(),
                });
            }
            let (width, height) = pair.on_white.dimensions();
            Ok(AlphaOutput {
                image: RgbaImage::new(width, height),
                stats: AlphaStats {
                    width,
                    height,
                    ..Default::default()
                },
            })
        }

        async fn load(&self, _output: &AlphaOutput) -> Result<String> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok("done.png".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_returns_summary() {
        let engine = AlphaEngine::new(CountingPipeline::default());

        let summary = engine.run().await.unwrap();

        assert_eq!(summary.output_path, "done.png");
        assert_eq!(summary.stats.total_pixels(), 4);
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_stops_before_load_on_failure() {
        let engine = AlphaEngine::new(CountingPipeline {
            fail_transform: true,
            ..Default::default()
        });

        assert!(engine.run().await.is_err());
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }
}
