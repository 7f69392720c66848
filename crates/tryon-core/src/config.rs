// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Analyzer configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TryOnError};

/// Minimum native width, in pixels, before `LowResolution` is reported.
pub const MIN_WIDTH: u32 = 300;
/// Minimum native height, in pixels, before `LowResolution` is reported.
pub const MIN_HEIGHT: u32 = 300;
/// Longest edge of the analysis raster after downsampling.
pub const ANALYSIS_MAX_EDGE: u32 = 500;
/// Mean `(R+G+B)/3` below which the photo is `TooDark`.
pub const DARKNESS_THRESHOLD: f64 = 70.0;
/// Laplacian variance below which the photo is `Blurry`.
pub const BLUR_THRESHOLD: f64 = 100.0;

/// Thresholds used by the image quality analyzer.
///
/// Missing fields in a JSON file fall back to the defaults, so a config
/// file only needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Minimum acceptable native width in pixels.
    pub min_width: u32,
    /// Minimum acceptable native height in pixels.
    pub min_height: u32,
    /// Long-edge cap for the analysis raster (images are never upscaled).
    pub analysis_max_edge: u32,
    /// Average simple-mean brightness below which the image is too dark.
    pub darkness_threshold: f64,
    /// Laplacian variance below which the image is blurry.
    pub blur_threshold: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
            analysis_max_edge: ANALYSIS_MAX_EDGE,
            darkness_threshold: DARKNESS_THRESHOLD,
            blur_threshold: BLUR_THRESHOLD,
        }
    }
}

impl QualityConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Reject values the analyzer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.min_width == 0 || self.min_height == 0 {
            return Err(TryOnError::Config(
                "min_width and min_height must be greater than zero".into(),
            ));
        }
        if self.analysis_max_edge == 0 {
            return Err(TryOnError::Config(
                "analysis_max_edge must be greater than zero".into(),
            ));
        }
        for (name, value) in [
            ("darkness_threshold", self.darkness_threshold),
            ("blur_threshold", self.blur_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TryOnError::Config(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_published_constants() {
        let config = QualityConfig::default();
        assert_eq!(config.min_width, 300);
        assert_eq!(config.min_height, 300);
        assert_eq!(config.analysis_max_edge, 500);
        assert_eq!(config.darkness_threshold, 70.0);
        assert_eq!(config.blur_threshold, 100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = QualityConfig::from_json_str(r#"{ "blur_threshold": 42.5 }"#).unwrap();
        assert_eq!(config.blur_threshold, 42.5);
        assert_eq!(config.min_width, MIN_WIDTH);
        assert_eq!(config.darkness_threshold, DARKNESS_THRESHOLD);
    }

    #[test]
    fn zero_analysis_edge_is_rejected() {
        let err = QualityConfig::from_json_str(r#"{ "analysis_max_edge": 0 }"#).unwrap_err();
        assert!(matches!(err, TryOnError::Config(_)));
    }

    #[test]
    fn zero_min_dimension_is_rejected() {
        for json in [
            r#"{ "min_width": 0 }"#,
            r#"{ "min_height": 0 }"#,
            r#"{ "min_width": 0, "min_height": 0 }"#,
        ] {
            let err = QualityConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, TryOnError::Config(_)), "{json} should be rejected");
        }
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let config = QualityConfig {
            darkness_threshold: -1.0,
            ..QualityConfig::default()
        };
        assert!(matches!(config.validate(), Err(TryOnError::Config(_))));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = QualityConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TryOnError::Serialization(_)));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "min_width": 640, "min_height": 480 }}"#).unwrap();

        let config = QualityConfig::load(file.path()).unwrap();
        assert_eq!(config.min_width, 640);
        assert_eq!(config.min_height, 480);
        assert_eq!(config.analysis_max_edge, ANALYSIS_MAX_EDGE);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = QualityConfig::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, TryOnError::Io(_)));
    }
}
