// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the try-on quality gate.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{Result, TryOnError};

/// MIME type assumed when a buffer arrives without one.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Standard alphabet, padding optional on decode (browsers' `atob` accepts
/// unpadded payloads too).
const DATA_URL_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// An encoded raster image (PNG, JPEG, WEBP, ...) together with the MIME
/// type its producer declared.
///
/// Immutable once built. The declared type is advisory: decoding sniffs the
/// payload and only falls back to the declared type when sniffing fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    mime: String,
}

impl EncodedImage {
    /// Wrap an in-memory encoded buffer.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, mime: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime: mime.into(),
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URL.
    ///
    /// Only base64 payloads are accepted; percent-encoded data URLs carry
    /// text, not rasters. An empty MIME part becomes [`UNKNOWN_MIME`].
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| TryOnError::InvalidDataUrl("missing `data:` scheme".into()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| TryOnError::InvalidDataUrl("missing `,` before payload".into()))?;

        let mut params = header.split(';');
        let mime = params.next().unwrap_or_default().trim();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(TryOnError::InvalidDataUrl(
                "payload is not base64-encoded".into(),
            ));
        }

        // Line-wrapped payloads are common when URLs are pasted from logs.
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = DATA_URL_ENGINE.decode(compact.as_bytes())?;

        let mime = if mime.is_empty() {
            UNKNOWN_MIME.to_owned()
        } else {
            mime.to_ascii_lowercase()
        };
        Ok(Self { bytes, mime })
    }

    /// Re-encode as a base64 data URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    /// The encoded payload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The declared MIME type.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hex SHA-256 of the payload.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }
}

/// Infer an image MIME type from a file extension.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

/// A reason the photo is unfit for try-on processing.
///
/// Variant order is the order checks run in, which is also the order
/// issues appear in a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum IssueKind {
    LowResolution,
    TooDark,
    Blurry,
}

impl IssueKind {
    /// Stable localization key for this issue.
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::LowResolution => "quality.low_resolution",
            Self::TooDark => "quality.too_dark",
            Self::Blurry => "quality.blurry",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::LowResolution => "low resolution",
            Self::TooDark => "too dark",
            Self::Blurry => "blurry",
        };
        f.write_str(label)
    }
}

/// Pass/fail verdict for one photo.
///
/// `is_acceptable` holds exactly when `issues` is empty; the constructors
/// are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityVerdict {
    is_acceptable: bool,
    issues: Vec<IssueKind>,
}

impl QualityVerdict {
    /// A verdict with no issues.
    pub fn accept() -> Self {
        Self {
            is_acceptable: true,
            issues: Vec::new(),
        }
    }

    /// Build a verdict from issues in detection order. Repeated kinds keep
    /// their first position.
    pub fn from_issues(issues: impl IntoIterator<Item = IssueKind>) -> Self {
        let mut ordered: Vec<IssueKind> = Vec::new();
        for issue in issues {
            if !ordered.contains(&issue) {
                ordered.push(issue);
            }
        }
        Self {
            is_acceptable: ordered.is_empty(),
            issues: ordered,
        }
    }

    pub fn is_acceptable(&self) -> bool {
        self.is_acceptable
    }

    pub fn issues(&self) -> &[IssueKind] {
        &self.issues
    }

    pub fn has(&self, issue: IssueKind) -> bool {
        self.issues.contains(&issue)
    }
}

impl Default for QualityVerdict {
    fn default() -> Self {
        Self::accept()
    }
}

/// Raw measurements behind a verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    pub native_width: u32,
    pub native_height: u32,
    /// Analysis raster size; zero when no sampling surface could be made.
    pub analysis_width: u32,
    pub analysis_height: u32,
    /// Mean of `(R+G+B)/3` over the analysis raster.
    pub avg_brightness: Option<f64>,
    /// Variance of the discrete Laplacian over the analysis raster.
    pub laplacian_variance: Option<f64>,
}

/// A verdict plus the measurements it was derived from.
///
/// `metrics` is `None` when the image could not be decoded, in which case
/// the verdict is the permissive accept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityAssessment {
    pub verdict: QualityVerdict,
    pub metrics: Option<QualityMetrics>,
}

impl QualityAssessment {
    /// Assessment for an image that could not be judged.
    pub fn undecidable() -> Self {
        Self {
            verdict: QualityVerdict::accept(),
            metrics: None,
        }
    }
}
