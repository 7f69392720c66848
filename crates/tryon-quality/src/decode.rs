// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decoding of encoded uploads into RGBA8 rasters.

use std::io::Cursor;

use image::{ImageFormat, ImageReader, RgbaImage};
use tracing::{debug, instrument};
use tryon_core::EncodedImage;
use tryon_core::error::{Result, TryOnError};

/// Decode an encoded upload into an RGBA8 raster at its native size.
///
/// The container format is sniffed from the payload. The declared MIME type
/// is only consulted when sniffing finds nothing, matching how browsers
/// treat `data:` URLs.
#[instrument(skip(image), fields(mime = image.mime(), data_len = image.len()))]
pub fn decode_raster(image: &EncodedImage) -> Result<RgbaImage> {
    let mut reader = ImageReader::new(Cursor::new(image.bytes())).with_guessed_format()?;

    if reader.format().is_none() {
        let declared = ImageFormat::from_mime_type(image.mime())
            .ok_or_else(|| TryOnError::UnsupportedMime(image.mime().to_owned()))?;
        debug!(?declared, "Payload not recognised, trusting declared type");
        reader.set_format(declared);
    }

    let decoded = reader
        .decode()
        .map_err(|err| TryOnError::ImageDecode(err.to_string()))?;
    debug!(
        width = decoded.width(),
        height = decoded.height(),
        "Image decoded from bytes"
    );
    Ok(decoded.to_rgba8())
}
