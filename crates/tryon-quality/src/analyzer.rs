// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image quality analyzer — decides whether an uploaded photo is fit for
// person detection and try-on generation.
//
// Pipeline: decode -> native resolution check -> downsample to the analysis
// raster -> brightness check -> Laplacian-variance blur check.

use image::RgbaImage;
use tracing::{debug, info, instrument, warn};
use tryon_core::error::Result;
use tryon_core::{
    EncodedImage, IssueKind, QualityAssessment, QualityConfig, QualityMetrics, QualityVerdict,
};

use crate::decode::decode_raster;
use crate::metrics::{GrayscaleBuffer, analysis_raster, average_brightness};

/// Stateless quality gate for uploaded photographs.
///
/// Every call decodes into its own buffers and drops them before returning,
/// so one analyzer can be shared freely between threads and tasks.
///
/// Undecodable input is never an error here: a photo the analyzer cannot
/// read is accepted, and whichever step consumes it next reports the
/// failure.
///
/// ```ignore
/// let analyzer = ImageQualityAnalyzer::default();
/// let verdict = analyzer.analyze(&EncodedImage::from_data_url(url)?);
/// if !verdict.is_acceptable() {
///     show(summarize_verdict(&verdict));
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImageQualityAnalyzer {
    config: QualityConfig,
}

impl ImageQualityAnalyzer {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    // -- Entry points ---------------------------------------------------------

    /// Judge an encoded photo.
    pub fn analyze(&self, image: &EncodedImage) -> QualityVerdict {
        self.analyze_detailed(image).verdict
    }

    /// Judge a `data:<mime>;base64,...` URL. A URL that cannot be parsed is
    /// treated like any other undecodable input.
    pub fn analyze_data_url(&self, url: &str) -> QualityVerdict {
        match EncodedImage::from_data_url(url) {
            Ok(image) => self.analyze(&image),
            Err(err) => {
                warn!(error = %err, "Quality check skipped: data URL rejected");
                QualityVerdict::accept()
            }
        }
    }

    /// Judge an encoded photo and keep the measurements.
    #[instrument(skip_all, fields(mime = image.mime(), data_len = image.len()))]
    pub fn analyze_detailed(&self, image: &EncodedImage) -> QualityAssessment {
        match self.try_analyze(image) {
            Ok(assessment) => assessment,
            Err(err) => {
                warn!(error = %err, "Quality check skipped: image could not be decoded");
                QualityAssessment::undecidable()
            }
        }
    }

    /// Async form of [`analyze`](Self::analyze). Decoding and analysis run
    /// on the blocking pool; the caller awaits once.
    pub async fn analyze_async(&self, image: EncodedImage) -> QualityVerdict {
        self.analyze_detailed_async(image).await.verdict
    }

    /// Async form of [`analyze_detailed`](Self::analyze_detailed).
    pub async fn analyze_detailed_async(&self, image: EncodedImage) -> QualityAssessment {
        let analyzer = self.clone();
        match tokio::task::spawn_blocking(move || analyzer.analyze_detailed(&image)).await {
            Ok(assessment) => assessment,
            Err(err) => {
                warn!(error = %err, "Quality check skipped: analysis task failed");
                QualityAssessment::undecidable()
            }
        }
    }

    // -- Pipeline -------------------------------------------------------------

    fn try_analyze(&self, image: &EncodedImage) -> Result<QualityAssessment> {
        let raster = decode_raster(image)?;
        Ok(self.assess_raster(&raster))
    }

    /// Run every check on an already-decoded raster at native size.
    ///
    /// Issues are reported in check order: resolution, brightness, sharpness.
    pub fn assess_raster(&self, raster: &RgbaImage) -> QualityAssessment {
        let config = &self.config;
        let (native_width, native_height) = raster.dimensions();
        let mut issues = Vec::with_capacity(3);

        if native_width < config.min_width || native_height < config.min_height {
            issues.push(IssueKind::LowResolution);
        }

        let analysis = match analysis_raster(raster, config.analysis_max_edge) {
            Ok(analysis) => analysis,
            Err(err) => {
                debug!(error = %err, "No analysis surface, only resolution was checked");
                return QualityAssessment {
                    verdict: QualityVerdict::from_issues(issues),
                    metrics: Some(QualityMetrics {
                        native_width,
                        native_height,
                        analysis_width: 0,
                        analysis_height: 0,
                        avg_brightness: None,
                        laplacian_variance: None,
                    }),
                };
            }
        };

        let avg_brightness = average_brightness(&analysis);
        if avg_brightness < config.darkness_threshold {
            issues.push(IssueKind::TooDark);
        }

        let laplacian_variance = GrayscaleBuffer::from_rgba(&analysis).laplacian_variance();
        if laplacian_variance < config.blur_threshold {
            issues.push(IssueKind::Blurry);
        }

        let verdict = QualityVerdict::from_issues(issues);
        info!(
            native_width,
            native_height,
            analysis_width = analysis.width(),
            analysis_height = analysis.height(),
            avg_brightness,
            laplacian_variance,
            acceptable = verdict.is_acceptable(),
            "Quality check complete"
        );

        QualityAssessment {
            verdict,
            metrics: Some(QualityMetrics {
                native_width,
                native_height,
                analysis_width: analysis.width(),
                analysis_height: analysis.height(),
                avg_brightness: Some(avg_brightness),
                laplacian_variance: Some(laplacian_variance),
            }),
        }
    }
}

/// Judge an encoded photo with the default thresholds.
pub fn analyze(image: &EncodedImage) -> QualityVerdict {
    ImageQualityAnalyzer::default().analyze(image)
}
