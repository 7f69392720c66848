// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the try-on quality gate.

use thiserror::Error;

/// Top-level error type for all quality-gate operations.
///
/// The analyzer never hands these to its callers: a failed decode turns into
/// an accepting verdict. They surface only from input handling (data URLs,
/// files) and configuration loading.
#[derive(Debug, Error)]
pub enum TryOnError {
    // -- Input errors --
    #[error("malformed data URL: {0}")]
    InvalidDataUrl(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unsupported image type: {0}")]
    UnsupportedMime(String),

    // -- Raster errors --
    #[error("image decoding failed: {0}")]
    ImageDecode(String),

    #[error("cannot sample a {width}x{height} raster")]
    EmptyRaster { width: u32, height: u32 },

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Storage / serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TryOnError>;
