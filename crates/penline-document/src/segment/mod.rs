// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line segmentation pipeline. Each stage is a pure function of the previous
// stage's output and the segmentation config:
//
//   binarize -> grid -> denoise -> glyph -> candidates -> merge
//
// Binary masks are `GrayImage`s holding 0 (background) or 255 (ink).

pub mod binarize;
pub mod candidates;
pub mod denoise;
pub mod glyph;
pub mod grid;
pub mod merge;
pub mod morphology;
pub mod pipeline;
pub mod regions;

pub use pipeline::{LineSegmenter, SegmentationReport, segment_lines};

#[cfg(test)]
pub(crate) mod fixtures;
