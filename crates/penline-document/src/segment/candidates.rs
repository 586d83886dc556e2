// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line candidate extraction by anisotropic dilation.

use image::GrayImage;
use penline_core::{BoundingBox, LineParameters};
use tracing::{info, instrument};

use super::morphology::{StructuringElement, dilate};
use super::regions::external_boxes;

/// Fuse neighbouring glyphs into line-shaped blobs and return the boxes of
/// those large enough to be writing.
///
/// The kernel is wide enough to bridge gaps between letters and words but
/// shorter than the gap between lines. A candidate survives only if it is
/// strictly wider than `min_width` and strictly taller than `min_height`.
/// Boxes come back unordered and may split one line into several fragments.
#[instrument(skip_all, fields(kernel_w = params.kernel_width, kernel_h = params.kernel_height))]
pub fn extract_candidates(mask: &GrayImage, params: &LineParameters) -> Vec<BoundingBox> {
    let element = StructuringElement::new(params.kernel_width, params.kernel_height);
    let fused = dilate(mask, element);

    let regions = external_boxes(&fused);
    let total = regions.len();
    let candidates: Vec<BoundingBox> = regions
        .into_iter()
        .filter(|b| b.width > params.min_width && b.height > params.min_height)
        .collect();

    info!(
        regions = total,
        fragments = candidates.len(),
        min_w = params.min_width,
        min_h = params.min_height,
        "Line fragments extracted"
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::fixtures::{STROKE_HEIGHT, fill_rect};
    use crate::segment::morphology::FOREGROUND;
    use crate::segment::regions::external_boxes;
    use penline_core::SegmentationConfig;

    fn bars(mask: &mut GrayImage, x: u32, y: u32, count: u32) {
        for i in 0..count {
            fill_rect(mask, x + i * 8, y, 4, STROKE_HEIGHT, FOREGROUND);
        }
    }

    #[test]
    fn glyphs_on_a_line_fuse_into_one_candidate() {
        let mut mask = GrayImage::new(400, 200);
        bars(&mut mask, 60, 50, 30);

        let params = SegmentationConfig::default().line_parameters(20.0);
        let candidates = extract_candidates(&mask, &params);
        // Kernel 80x8 anchored at (40, 4): grows 39 left, 40 right, 3 up, 4 down.
        assert_eq!(candidates, vec![BoundingBox::new(21, 47, 315, 27)]);
    }

    #[test]
    fn separate_lines_stay_separate() {
        let mut mask = GrayImage::new(400, 200);
        bars(&mut mask, 60, 30, 10);
        bars(&mut mask, 60, 90, 10);

        let params = SegmentationConfig::default().line_parameters(20.0);
        let mut candidates = extract_candidates(&mask, &params);
        candidates.sort_by_key(|b| b.y);
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].bottom() <= candidates[1].y);
    }

    #[test]
    fn small_specks_are_filtered_out() {
        let mut mask = GrayImage::new(300, 200);
        bars(&mut mask, 60, 30, 10);
        // A lone dot grows to 80x8 after dilation: wide enough, but not tall enough.
        fill_rect(&mut mask, 200, 150, 1, 1, FOREGROUND);

        let params = SegmentationConfig::default().line_parameters(20.0);
        let candidates = extract_candidates(&mask, &params);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].y, 27);
    }

    #[test]
    fn identity_kernel_yields_plain_components() {
        let mut mask = GrayImage::new(100, 100);
        fill_rect(&mut mask, 5, 5, 10, 3, FOREGROUND);
        fill_rect(&mut mask, 40, 60, 2, 7, FOREGROUND);
        fill_rect(&mut mask, 70, 20, 1, 1, FOREGROUND);

        // Degenerate glyph height: the kernel collapses to 1x1 and the size
        // filter keeps everything.
        let params = SegmentationConfig::default().line_parameters(0.2);
        assert_eq!(params.kernel_width, 1);
        assert_eq!(params.kernel_height, 1);

        assert_eq!(extract_candidates(&mask, &params), external_boxes(&mask));
    }

    #[test]
    fn lines_reaching_the_page_edges_are_kept() {
        let mut mask = GrayImage::new(300, 200);
        // Starts at the left margin; dilation runs off the left edge.
        bars(&mut mask, 0, 20, 6);
        // Ends at the right margin.
        bars(&mut mask, 252, 80, 6);
        // Written on the top edge.
        bars(&mut mask, 180, 0, 6);
        // Written on the bottom edge.
        bars(&mut mask, 100, 180, 6);

        let params = SegmentationConfig::default().line_parameters(20.0);
        let mut candidates = extract_candidates(&mask, &params);
        candidates.sort_by_key(|b| (b.y, b.x));

        assert_eq!(candidates.len(), 4, "{candidates:?}");
        assert!(candidates.iter().all(|b| b.fits_within(300, 200)));
        assert_eq!(candidates[0].y, 0);
        assert_eq!(candidates[1].x, 0);
        assert_eq!(candidates[2].right(), 300);
        assert_eq!(candidates[3].bottom(), 200);
    }
}
