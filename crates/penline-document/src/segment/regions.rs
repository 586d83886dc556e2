// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External contour extraction and bounding-rectangle reduction.

use image::{GrayImage, Luma};
use imageproc::contours::{BorderType, Contour, find_contours};
use penline_core::BoundingBox;

use super::morphology::BACKGROUND;

/// Bounding boxes of the outermost connected ink regions of `mask`.
///
/// Regions nested inside the hole of another region are skipped. Boxes come
/// back in raster order of each region's first border pixel; this is the
/// "detection order" later stages use to break ties.
pub fn external_boxes(mask: &GrayImage) -> Vec<BoundingBox> {
    // `find_contours` misreports regions touching the image edge (a parentless
    // hole that then adopts every later outer border), so trace a copy framed
    // by one pixel of paper and shift the points back.
    let framed = framed(mask);
    find_contours::<u32>(&framed)
        .iter()
        .filter(|contour| matches!(contour.border_type, BorderType::Outer) && contour.parent.is_none())
        .filter_map(bounding_rect)
        .collect()
}

fn framed(mask: &GrayImage) -> GrayImage {
    let (width, height) = mask.dimensions();
    GrayImage::from_fn(width + 2, height + 2, |x, y| {
        if x == 0 || y == 0 || x > width || y > height {
            Luma([BACKGROUND])
        } else {
            *mask.get_pixel(x - 1, y - 1)
        }
    })
}

/// Box of a contour traced on the framed mask, in unframed coordinates.
fn bounding_rect(contour: &Contour<u32>) -> Option<BoundingBox> {
    let first = contour.points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for point in &contour.points[1..] {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }
    Some(BoundingBox::from_extents(min_x - 1, min_y - 1, max_x - 1, max_y - 1))
}
