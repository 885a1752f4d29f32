use crate::domain::model::{AlphaOutput, ExtractOptions, ImagePair};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where one extraction job reads from and writes to.
pub trait ConfigProvider: Send + Sync {
    fn white_path(&self) -> &str;
    fn black_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn extract_options(&self) -> ExtractOptions;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ImagePair>;
    async fn transform(&self, pair: ImagePair) -> Result<AlphaOutput>;
    async fn load(&self, output: &AlphaOutput) -> Result<String>;
}
