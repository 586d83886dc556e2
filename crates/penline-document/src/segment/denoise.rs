// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Speckle removal: hole-punch shadows, adhesive dots, scanner dust.

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology;
use penline_core::SegmentationConfig;
use tracing::{debug, instrument};

use super::morphology::count_foreground;

/// Open the mask with a `denoise_kernel_size` square, deleting blobs that
/// cannot contain the square while leaving glyph-scale strokes in place.
#[instrument(skip_all, fields(kernel = config.denoise_kernel_size))]
pub fn denoise(mask: &GrayImage, config: &SegmentationConfig) -> GrayImage {
    let radius = (config.denoise_kernel_size / 2) as u8;
    let cleaned = morphology::open(mask, Norm::LInf, radius);
    debug!(remaining_ink = count_foreground(&cleaned), "Speckle removed");
    cleaned
}
