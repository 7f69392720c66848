// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-input results and their text / JSON rendering.

use serde::Serialize;
use tryon_core::human_errors::{humanize_error, summarize_verdict};
use tryon_core::{QualityAssessment, QualityMetrics, QualityVerdict, TryOnError};

/// Outcome for one command-line input.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputReport {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<QualityVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<QualityMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InputReport {
    pub fn analyzed(
        input: String,
        fingerprint: String,
        assessment: QualityAssessment,
        detailed: bool,
    ) -> Self {
        Self {
            input,
            fingerprint: Some(fingerprint),
            message: summarize_verdict(&assessment.verdict),
            verdict: Some(assessment.verdict),
            metrics: if detailed { assessment.metrics } else { None },
            error: None,
        }
    }

    pub fn failed(input: String, err: &TryOnError) -> Self {
        let human = humanize_error(err);
        Self {
            input,
            fingerprint: None,
            verdict: None,
            metrics: None,
            message: Some(format!("{} {}", human.message, human.suggestion)),
            error: Some(err.to_string()),
        }
    }

    /// Whether this input may proceed to person detection.
    pub fn passed(&self) -> bool {
        self.verdict.as_ref().is_some_and(QualityVerdict::is_acceptable)
    }

    /// One or more human-readable lines.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        match &self.verdict {
            Some(verdict) if verdict.is_acceptable() => {
                out.push_str(&format!("PASS  {}", self.input));
            }
            Some(verdict) => {
                let issues: Vec<String> = verdict.issues().iter().map(|i| i.to_string()).collect();
                out.push_str(&format!("FAIL  {}  [{}]", self.input, issues.join(", ")));
            }
            None => out.push_str(&format!("ERROR {}", self.input)),
        }
        if let Some(fingerprint) = &self.fingerprint {
            out.push_str(&format!("\n      sha256 {fingerprint}"));
        }
        if let Some(metrics) = &self.metrics {
            out.push_str(&format!(
                "\n      native {}x{}, analysed {}x{}",
                metrics.native_width,
                metrics.native_height,
                metrics.analysis_width,
                metrics.analysis_height
            ));
            if let Some(brightness) = metrics.avg_brightness {
                out.push_str(&format!(", brightness {brightness:.1}"));
            }
            if let Some(variance) = metrics.laplacian_variance {
                out.push_str(&format!(", laplacian variance {variance:.1}"));
            }
        }
        if let Some(message) = &self.message {
            out.push_str(&format!("\n      {message}"));
        }
        out
    }
}
