// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable messages for quality issues and input errors.
//
// Every issue kind and every technical error maps to a plain English message
// with a clear suggestion. Localized front ends look messages up by key and
// use the English text only as a fallback.

use crate::error::TryOnError;
use crate::types::{IssueKind, QualityVerdict};

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Temporary failure — trying again may work.
    Transient,
    /// User must do something (pick another photo, fix a setting).
    ActionRequired,
    /// Cannot be fixed by retrying — the input itself is unusable.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether the caller may simply retry.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Default text for one quality issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueMessage {
    /// Localization key, see [`IssueKind::message_key`].
    pub key: &'static str,
    pub message: &'static str,
    pub suggestion: &'static str,
}

/// English message and suggestion for a quality issue.
pub fn describe_issue(issue: IssueKind) -> IssueMessage {
    let (message, suggestion) = match issue {
        IssueKind::LowResolution => (
            "This photo is too small.",
            "Please use a photo that is at least 300 by 300 pixels.",
        ),
        IssueKind::TooDark => (
            "This photo is too dark.",
            "Try taking the photo somewhere with more light.",
        ),
        IssueKind::Blurry => (
            "This photo looks blurry.",
            "Hold the camera steady and make sure the person is in focus.",
        ),
    };
    IssueMessage {
        key: issue.message_key(),
        message,
        suggestion,
    }
}

/// Join the messages for every issue, in verdict order, into one string.
///
/// Returns `None` for an acceptable verdict.
pub fn summarize_verdict(verdict: &QualityVerdict) -> Option<String> {
    if verdict.is_acceptable() {
        return None;
    }
    let parts: Vec<String> = verdict
        .issues()
        .iter()
        .map(|issue| {
            let text = describe_issue(*issue);
            format!("{} {}", text.message, text.suggestion)
        })
        .collect();
    Some(parts.join(" "))
}

/// Convert a `TryOnError` into a `HumanError` anyone can understand.
pub fn humanize_error(err: &TryOnError) -> HumanError {
    match err {
        // -- Input errors --
        TryOnError::InvalidDataUrl(_) | TryOnError::Base64(_) => HumanError {
            message: "The photo didn't arrive in one piece.".into(),
            suggestion: "Try uploading the photo again.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        TryOnError::UnsupportedMime(detail) => HumanError {
            message: "This type of file isn't supported.".into(),
            suggestion: format!("Please use a JPEG, PNG, or WEBP photo. (File type: {detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- Raster errors --
        TryOnError::ImageDecode(_) | TryOnError::EmptyRaster { .. } => HumanError {
            message: "There's a problem with this photo.".into(),
            suggestion: "The photo may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- Configuration --
        TryOnError::Config(detail) => HumanError {
            message: "The quality settings aren't valid.".into(),
            suggestion: format!("Check the settings file and try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        TryOnError::Serialization(_) => HumanError {
            message: "The settings file couldn't be read.".into(),
            suggestion: "Make sure the settings file is valid JSON.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Storage --
        TryOnError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "We aren't allowed to open that file.".into(),
                    suggestion: "Check the file's permissions, or copy it somewhere you can read it.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "Something went wrong reading the file.".into(),
                    suggestion: "Try again in a moment.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }
    }
}
