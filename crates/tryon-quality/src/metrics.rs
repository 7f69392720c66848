// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel statistics behind the quality checks: analysis-raster downsampling,
// simple-mean brightness, perceptual grayscale, and Laplacian variance.

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tryon_core::error::{Result, TryOnError};

/// Shrink `raster` so its longest edge is at most `max_edge`.
///
/// Never upscales. Target dimensions are `round(native * scale)`; if either
/// rounds to zero there is nothing to sample and `EmptyRaster` is returned.
pub fn analysis_raster(raster: &RgbaImage, max_edge: u32) -> Result<Cow<'_, RgbaImage>> {
    let (width, height) = raster.dimensions();
    let long_edge = width.max(height);
    if long_edge == 0 {
        return Err(TryOnError::EmptyRaster { width, height });
    }

    let scale = (f64::from(max_edge) / f64::from(long_edge)).min(1.0);
    let target_w = (f64::from(width) * scale).round() as u32;
    let target_h = (f64::from(height) * scale).round() as u32;

    if target_w == 0 || target_h == 0 {
        return Err(TryOnError::EmptyRaster {
            width: target_w,
            height: target_h,
        });
    }
    if (target_w, target_h) == (width, height) {
        return Ok(Cow::Borrowed(raster));
    }

    Ok(Cow::Owned(imageops::resize(
        raster,
        target_w,
        target_h,
        FilterType::Triangle,
    )))
}

/// Colour channels as read back from a drawing surface: a fully
/// transparent pixel reads as black.
fn visible_rgb(pixel: &Rgba<u8>) -> [f64; 3] {
    let Rgba([r, g, b, a]) = *pixel;
    if a == 0 {
        return [0.0; 3];
    }
    [f64::from(r), f64::from(g), f64::from(b)]
}

/// Mean of `(R+G+B)/3` over every pixel.
///
/// This is the unweighted channel average, not perceptual luma.
pub fn average_brightness(raster: &RgbaImage) -> f64 {
    let count = u64::from(raster.width()) * u64::from(raster.height());
    if count == 0 {
        return 0.0;
    }
    let total: f64 = raster
        .pixels()
        .map(|pixel| {
            let [r, g, b] = visible_rgb(pixel);
            (r + g + b) / 3.0
        })
        .sum();
    total / count as f64
}

/// Single-channel float buffer, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayscaleBuffer {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl GrayscaleBuffer {
    /// Convert with weights `0.299R + 0.587G + 0.114B`.
    pub fn from_rgba(raster: &RgbaImage) -> Self {
        let data = raster
            .pixels()
            .map(|pixel| {
                let [r, g, b] = visible_rgb(pixel);
                0.299 * r + 0.587 * g + 0.114 * b
            })
            .collect();
        Self {
            width: raster.width(),
            height: raster.height(),
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Variance of the 4-neighbour Laplacian.
    ///
    /// `L = 4*c - top - bottom - left - right` is evaluated on interior
    /// pixels only; the 1-pixel border stays 0. Mean and variance are both
    /// taken over the whole `width * height` grid, border zeros included.
    pub fn laplacian_variance(&self) -> f64 {
        let width = self.width as usize;
        let height = self.height as usize;
        let total = width * height;
        if total == 0 {
            return 0.0;
        }

        let mut laplacian = vec![0.0f64; total];
        if width >= 3 && height >= 3 {
            for y in 1..height - 1 {
                for x in 1..width - 1 {
                    let i = y * width + x;
                    laplacian[i] = 4.0 * self.data[i]
                        - self.data[i - width]
                        - self.data[i + width]
                        - self.data[i - 1]
                        - self.data[i + 1];
                }
            }
        }

        let n = total as f64;
        let mean = laplacian.iter().sum::<f64>() / n;
        laplacian.iter().map(|l| (l - mean) * (l - mean)).sum::<f64>() / n
    }
}
