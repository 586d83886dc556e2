// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// penline-document — Page loading and handwriting line segmentation.
//
// Provides page decoding (any format the `image` crate reads) and the line
// segmentation pipeline (adaptive binarization, ruling suppression, denoising,
// glyph-size estimation, line candidate extraction, fragment merging).

pub mod page;
pub mod segment;

// Re-export the primary entry points so callers can use `penline_document::LineSegmenter` etc.
pub use page::loader::PageImage;
pub use segment::pipeline::{LineSegmenter, SegmentationReport, segment_lines};
