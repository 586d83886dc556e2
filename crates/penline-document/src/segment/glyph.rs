// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Glyph-size estimation. The median glyph height is the scale reference for
// every later stage.

use image::GrayImage;
use penline_core::{BoundingBox, Result, SegmentationConfig, SegmentationError};
use tracing::{info, instrument, warn};

use super::regions::external_boxes;

/// Heights of every plausible glyph in the mask.
///
/// A component counts when its height exceeds `min_glyph_height` and both its
/// height and width stay below `max_glyph_extent`.
pub fn glyph_heights(mask: &GrayImage, config: &SegmentationConfig) -> Vec<u32> {
    external_boxes(mask)
        .into_iter()
        .filter(|b| is_plausible_glyph(b, config))
        .map(|b| b.height)
        .collect()
}

fn is_plausible_glyph(b: &BoundingBox, config: &SegmentationConfig) -> bool {
    b.height > config.min_glyph_height
        && b.height < config.max_glyph_extent
        && b.width < config.max_glyph_extent
}

/// Median of `values`; the mean of the two middle values for even lengths.
pub fn median(values: &mut [u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid] as f64)
    } else {
        Some((values[mid - 1] as f64 + values[mid] as f64) / 2.0)
    }
}

/// Median height of the plausible glyphs in a cleaned mask.
///
/// Returns `NoGlyphsFound` when no component passes the plausibility filter.
#[instrument(skip_all)]
pub fn estimate_glyph_height(mask: &GrayImage, config: &SegmentationConfig) -> Result<f64> {
    let mut heights = glyph_heights(mask, config);
    let Some(height) = median(&mut heights) else {
        warn!("No glyph-sized components found");
        return Err(SegmentationError::NoGlyphsFound);
    };
    info!(glyphs = heights.len(), median_height = height, "Glyph height estimated");
    Ok(height)
}
