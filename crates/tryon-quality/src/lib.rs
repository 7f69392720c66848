// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tryon-quality — Photo quality gate for the virtual try-on workflow.
//
// Decodes an uploaded photo, checks its native resolution, then measures
// brightness and sharpness (Laplacian variance) on a downsampled copy and
// returns a pass/fail verdict with the reasons.

pub mod analyzer;
pub mod decode;
pub mod metrics;

// Re-export the primary entry points so callers can use `tryon_quality::analyze` etc.
pub use analyzer::{ImageQualityAnalyzer, analyze};
pub use decode::decode_raster;
pub use metrics::GrayscaleBuffer;
