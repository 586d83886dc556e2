// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for people submitting photographed pages.
//
// Every segmentation failure is mapped to plain English with a clear suggestion
// so the caller can ask for a better photo instead of grading degraded data.

use crate::error::SegmentationError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// User must do something (retake the photo, fix the config).
    ActionRequired,
    /// Cannot be fixed by the user; the input or environment is broken.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether repeating the same call could succeed. Segmentation is
    /// deterministic, so this is always false.
    pub retriable: bool,
    /// Severity level.
    pub severity: Severity,
}

/// Convert a `SegmentationError` into a `HumanError`.
pub fn humanize_error(err: &SegmentationError) -> HumanError {
    match err {
        SegmentationError::ImageLoad(detail) => HumanError {
            message: "We couldn't open that picture.".into(),
            suggestion: format!("Upload a PNG or JPEG photo of the page. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SegmentationError::NoGlyphsFound => HumanError {
            message: "We couldn't find any handwriting on the page.".into(),
            suggestion: "Take a clearer, well-lit photo with the writing filling most of the frame.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SegmentationError::NoLineCandidates => HumanError {
            message: "We found marks on the page but couldn't make out lines of writing.".into(),
            suggestion: "Make sure the page is upright and in focus, then try another photo.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        SegmentationError::InvalidConfig(detail) => HumanError {
            message: "The line finder is set up incorrectly.".into(),
            suggestion: format!("Check the segmentation settings file. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        SegmentationError::Io(io_err) => HumanError {
            message: "A file couldn't be read or written.".into(),
            suggestion: format!("Check the file exists and you have permission to use it. ({io_err})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        SegmentationError::Serialization(json_err) => HumanError {
            message: "A settings or results file is not valid JSON.".into(),
            suggestion: format!("Fix or remove the file, then try again. ({json_err})"),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}
