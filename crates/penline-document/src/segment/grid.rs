// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ruling and grid-line suppression.
//
// Long, thin, straight runs survive an opening with a 1-pixel-thick kernel of
// length `grid_line_length`; handwriting strokes do not. Long underlines are
// removed as well.

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology;
use penline_core::SegmentationConfig;
use tracing::{debug, instrument};

use super::morphology::{StructuringElement, count_foreground, open, subtract, union};

/// Remove horizontal and vertical ruling lines from an ink mask.
#[instrument(skip_all, fields(length = config.grid_line_length))]
pub fn suppress_rulings(mask: &GrayImage, config: &SegmentationConfig) -> GrayImage {
    let rulings = detect_rulings(mask, config);
    let cleaned = subtract(mask, &rulings);
    debug!(
        ruling_pixels = count_foreground(&rulings),
        remaining_ink = count_foreground(&cleaned),
        "Rulings suppressed"
    );
    cleaned
}

/// Mask of every pixel belonging to (or bordering) a detected ruling line.
pub fn detect_rulings(mask: &GrayImage, config: &SegmentationConfig) -> GrayImage {
    let horizontal = detect_runs(
        mask,
        StructuringElement::horizontal(config.grid_line_length),
        config,
    );
    let vertical = detect_runs(
        mask,
        StructuringElement::vertical(config.grid_line_length),
        config,
    );
    union(&horizontal, &vertical)
}

fn detect_runs(
    mask: &GrayImage,
    element: StructuringElement,
    config: &SegmentationConfig,
) -> GrayImage {
    let runs = open(mask, element, config.grid_open_iterations);
    // Grow the runs so anti-aliased fringes go with them.
    if config.grid_dilate_radius == 0 {
        runs
    } else {
        morphology::dilate(&runs, Norm::LInf, config.grid_dilate_radius)
    }
}
