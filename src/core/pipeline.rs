use crate::core::alpha::extract_alpha;
use crate::core::{AlphaOutput, ConfigProvider, ImagePair, Pipeline, Storage};
use crate::utils::error::{AlphaError, Result};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

pub struct TwoPassPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> TwoPassPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn read_rgb(&self, path: &str) -> Result<RgbImage> {
        let bytes = self.storage.read_file(path).await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path);

        // 輸入可能帶 alpha，一律轉成 RGB
        let image = image::load_from_memory(&bytes)?;
        Ok(image.to_rgb8())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for TwoPassPipeline<S, C> {
    async fn extract(&self) -> Result<ImagePair> {
        let on_white = self.read_rgb(self.config.white_path()).await?;
        let on_black = self.read_rgb(self.config.black_path()).await?;

        Ok(ImagePair { on_white, on_black })
    }

    async fn transform(&self, pair: ImagePair) -> Result<AlphaOutput> {
        let options = self.config.extract_options();

        tokio::task::spawn_blocking(move || {
            extract_alpha(&pair.on_white, &pair.on_black, &options)
        })
        .await
        .map_err(|e| AlphaError::ProcessingError {
            message: format!("Alpha extraction task failed: {}", e),
        })?
    }

    async fn load(&self, output: &AlphaOutput) -> Result<String> {
        let mut buf = Cursor::new(Vec::new());
        output.image.write_to(&mut buf, ImageFormat::Png)?;

        let output_path = self.config.output_path();
        self.storage.write_file(output_path, buf.get_ref()).await?;

        Ok(output_path.to_string())
    }
}
