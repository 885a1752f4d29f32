use image::{RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Threshold below which a pixel's colour is discarded instead of un-premultiplied.
pub const DEFAULT_MIN_ALPHA: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractOptions {
    pub min_alpha: f64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_alpha: DEFAULT_MIN_ALPHA,
        }
    }
}

/// The same subject rendered over white and over black.
#[derive(Debug, Clone)]
pub struct ImagePair {
    pub on_white: RgbImage,
    pub on_black: RgbImage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlphaStats {
    pub width: u32,
    pub height: u32,
    pub opaque_pixels: u64,
    pub transparent_pixels: u64,
    pub partial_pixels: u64,
    pub mean_alpha: f64,
}

impl AlphaStats {
    pub fn total_pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

#[derive(Debug, Clone)]
pub struct AlphaOutput {
    pub image: RgbaImage,
    pub stats: AlphaStats,
}
