pub mod alpha;
pub mod batch;
pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{
    AlphaOutput, AlphaStats, ExtractOptions, ImagePair, DEFAULT_MIN_ALPHA,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
