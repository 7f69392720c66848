// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Turning command-line arguments into encoded images.

use std::path::Path;

use tracing::debug;
use tryon_core::error::Result;
use tryon_core::{EncodedImage, UNKNOWN_MIME, mime_for_extension};

/// Load one input: a literal `data:` URL, or a path to an image file whose
/// MIME type is inferred from its extension.
pub async fn load_input(arg: &str) -> Result<EncodedImage> {
    if arg.starts_with("data:") {
        return EncodedImage::from_data_url(arg);
    }

    let path = Path::new(arg);
    let bytes = tokio::fs::read(path).await?;
    let mime = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(mime_for_extension)
        .unwrap_or(UNKNOWN_MIME);
    debug!(path = %path.display(), mime, len = bytes.len(), "Input file read");
    Ok(EncodedImage::from_bytes(bytes, mime))
}
