// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Penline.

use thiserror::Error;

/// Top-level error type for all Penline operations.
///
/// Every variant is terminal for the invocation that produced it: the
/// pipeline never returns partial results.
#[derive(Debug, Error)]
pub enum SegmentationError {
    // -- Pipeline errors --
    #[error("failed to load image: {0}")]
    ImageLoad(String),

    #[error("no glyph-sized marks found on the page")]
    NoGlyphsFound,

    #[error("glyphs were found but no line candidates survived filtering")]
    NoLineCandidates,

    // -- Configuration --
    #[error("invalid segmentation config: {0}")]
    InvalidConfig(String),

    // -- Storage / serialization --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SegmentationError>;
