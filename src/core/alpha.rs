//! Two-pass alpha extraction.
//!
//! A subject rendered once over white and once over black differs between the
//! two renders exactly where it lets the background through. The distance
//! between the two observed colours, relative to the white/black distance,
//! gives the transparency; the render over black gives the premultiplied
//! colour.

use crate::domain::model::{AlphaOutput, AlphaStats, ExtractOptions};
use crate::utils::error::{AlphaError, Result};
use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Euclidean distance between pure white and pure black in RGB space.
pub fn background_distance() -> f64 {
    (3.0 * 255.0 * 255.0_f64).sqrt()
}

fn to_u8(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Alpha in `0.0..=1.0` for a single pair of observed pixels.
pub fn pixel_alpha(on_white: &Rgb<u8>, on_black: &Rgb<u8>) -> f64 {
    let dist = on_white
        .0
        .iter()
        .zip(on_black.0.iter())
        .map(|(&w, &b)| {
            let d = f64::from(w) - f64::from(b);
            d * d
        })
        .sum::<f64>()
        .sqrt();

    (1.0 - dist / background_distance()).clamp(0.0, 1.0)
}

/// Recovers the straight (un-premultiplied) RGBA pixel.
pub fn recover_pixel(on_white: &Rgb<u8>, on_black: &Rgb<u8>, options: &ExtractOptions) -> Rgba<u8> {
    let alpha = pixel_alpha(on_white, on_black);

    // 背景為黑色 (0,0,0)，故 (C - (1 - a) * BG) / a 簡化為 C / a
    let channel = |c: u8| {
        if alpha > options.min_alpha {
            to_u8(f64::from(c) / alpha)
        } else {
            0
        }
    };

    Rgba([
        channel(on_black[0]),
        channel(on_black[1]),
        channel(on_black[2]),
        to_u8(alpha * 255.0),
    ])
}

pub fn extract_alpha(
    on_white: &RgbImage,
    on_black: &RgbImage,
    options: &ExtractOptions,
) -> Result<AlphaOutput> {
    if on_white.dimensions() != on_black.dimensions() {
        return Err(AlphaError::DimensionMismatch {
            white: on_white.dimensions(),
            black: on_black.dimensions(),
        });
    }

    let (width, height) = on_white.dimensions();
    let mut image = RgbaImage::new(width, height);
    let mut stats = AlphaStats {
        width,
        height,
        ..Default::default()
    };
    let mut alpha_sum = 0.0;

    for ((out, white), black) in image
        .pixels_mut()
        .zip(on_white.pixels())
        .zip(on_black.pixels())
    {
        *out = recover_pixel(white, black, options);

        match out[3] {
            255 => stats.opaque_pixels += 1,
            0 => stats.transparent_pixels += 1,
            _ => stats.partial_pixels += 1,
        }
        alpha_sum += f64::from(out[3]) / 255.0;
    }

    let total = stats.total_pixels();
    if total > 0 {
        stats.mean_alpha = alpha_sum / total as f64;
    }

    tracing::debug!(
        "Extracted alpha for {}x{}: {} opaque, {} partial, {} transparent",
        width,
        height,
        stats.opaque_pixels,
        stats.partial_pixels,
        stats.transparent_pixels
    );

    Ok(AlphaOutput { image, stats })
}
