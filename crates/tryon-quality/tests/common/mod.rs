// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Synthetic photo fixtures for the quality integration tests.

#![allow(dead_code)]

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use tryon_core::EncodedImage;

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

/// Black and white squares of `cell` pixels, starting black at the origin.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, BLACK);
    for cy in 0..height.div_ceil(cell) {
        for cx in 0..width.div_ceil(cell) {
            if (cx + cy) % 2 == 1 {
                let rect = Rect::at((cx * cell) as i32, (cy * cell) as i32).of_size(cell, cell);
                draw_filled_rect_mut(&mut img, rect, WHITE);
            }
        }
    }
    img
}

/// Left-to-right ramp from black to white.
pub fn horizontal_gradient(width: u32, height: u32) -> RgbaImage {
    let span = width.saturating_sub(1).max(1);
    RgbaImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / span) as u8;
        Rgba([v, v, v, 255])
    })
}

/// Bilinear upscale, the way a phone "zoom" or a re-export would.
pub fn upscale(img: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    imageops::resize(img, width, height, FilterType::Triangle)
}

pub fn png(img: &RgbaImage) -> EncodedImage {
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("PNG encoding");
    EncodedImage::from_bytes(buffer, "image/png")
}

pub fn jpeg(img: &RgbaImage, quality: u8) -> EncodedImage {
    let mut buffer = Vec::new();
    let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    rgb.write_with_encoder(encoder).expect("JPEG encoding");
    EncodedImage::from_bytes(buffer, "image/jpeg")
}
