// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Binary morphology with rectangular structuring elements.
//
// `imageproc::morphology` only offers norm balls and masks up to 511 pixels
// across, while the line-extraction kernel grows with glyph height and the
// ruling kernels are one pixel thick. A rectangle is separable, so erosion and
// dilation run as a row sweep followed by a column sweep over prefix counts.
// Pixels outside the image are neutral: they never add ink and never block
// erosion.

use image::{GrayImage, Luma};

/// Mask value for ink.
pub const FOREGROUND: u8 = 255;
/// Mask value for paper.
pub const BACKGROUND: u8 = 0;

/// Rectangular kernel anchored at `(width / 2, height / 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuringElement {
    pub width: u32,
    pub height: u32,
}

impl StructuringElement {
    /// A `width` x `height` rectangle. Zero sides are raised to 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// A 1-pixel-tall horizontal run.
    pub fn horizontal(length: u32) -> Self {
        Self::new(length, 1)
    }

    /// A 1-pixel-wide vertical run.
    pub fn vertical(length: u32) -> Self {
        Self::new(1, length)
    }

    /// True for the 1x1 kernel, which leaves every mask unchanged.
    pub fn is_identity(&self) -> bool {
        self.width == 1 && self.height == 1
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Rows,
    Columns,
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Erode,
    Dilate,
}

/// Erode `mask`: a pixel stays ink only if every in-image pixel under the
/// kernel is ink.
pub fn erode(mask: &GrayImage, element: StructuringElement) -> GrayImage {
    let rows = sweep(mask, element.width, Axis::Rows, Op::Erode);
    sweep(&rows, element.height, Axis::Columns, Op::Erode)
}

/// Dilate `mask`: a pixel becomes ink if any pixel under the kernel is ink.
pub fn dilate(mask: &GrayImage, element: StructuringElement) -> GrayImage {
    let rows = sweep(mask, element.width, Axis::Rows, Op::Dilate);
    sweep(&rows, element.height, Axis::Columns, Op::Dilate)
}

/// Morphological opening: `iterations` erosions followed by as many dilations.
pub fn open(mask: &GrayImage, element: StructuringElement, iterations: u32) -> GrayImage {
    let mut out = mask.clone();
    for _ in 0..iterations {
        out = erode(&out, element);
    }
    for _ in 0..iterations {
        out = dilate(&out, element);
    }
    out
}

/// Pixels that are ink in either mask.
pub fn union(a: &GrayImage, b: &GrayImage) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        let ink = is_ink(a, x, y) || is_ink(b, x, y);
        Luma([if ink { FOREGROUND } else { BACKGROUND }])
    })
}

/// Pixels that are ink in `a` but not in `b` (saturating subtraction).
pub fn subtract(a: &GrayImage, b: &GrayImage) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        let ink = is_ink(a, x, y) && !is_ink(b, x, y);
        Luma([if ink { FOREGROUND } else { BACKGROUND }])
    })
}

/// Number of ink pixels in the mask.
pub fn count_foreground(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] != BACKGROUND).count()
}

fn is_ink(mask: &GrayImage, x: u32, y: u32) -> bool {
    mask.get_pixel(x, y).0[0] != BACKGROUND
}

/// One-dimensional erosion or dilation along every row or every column.
///
/// For a kernel of `length` anchored at `length / 2`, output position `i`
/// looks at input positions `[i - anchor, i - anchor + length - 1]`, clipped
/// to the image.
fn sweep(mask: &GrayImage, length: u32, axis: Axis, op: Op) -> GrayImage {
    if length <= 1 {
        return mask.clone();
    }
    let (width, height) = mask.dimensions();
    let (lines, span) = match axis {
        Axis::Rows => (height, width),
        Axis::Columns => (width, height),
    };
    let mut out = GrayImage::new(width, height);
    if span == 0 {
        return out;
    }

    let anchor = length / 2;
    let reach = length - 1 - anchor;
    let coords = |line: u32, i: u32| match axis {
        Axis::Rows => (i, line),
        Axis::Columns => (line, i),
    };

    let mut prefix = vec![0u32; span as usize + 1];
    for line in 0..lines {
        for i in 0..span {
            let (x, y) = coords(line, i);
            prefix[i as usize + 1] = prefix[i as usize] + u32::from(is_ink(mask, x, y));
        }
        for i in 0..span {
            let lo = i.saturating_sub(anchor) as usize;
            let hi = i.saturating_add(reach).min(span - 1) as usize;
            let count = prefix[hi + 1] - prefix[lo];
            let ink = match op {
                Op::Erode => count as usize == hi + 1 - lo,
                Op::Dilate => count > 0,
            };
            if ink {
                let (x, y) = coords(line, i);
                out.put_pixel(x, y, Luma([FOREGROUND]));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with(width: u32, height: u32, ink: &[(u32, u32)]) -> GrayImage {
        let mut mask = GrayImage::new(width, height);
        for &(x, y) in ink {
            mask.put_pixel(x, y, Luma([FOREGROUND]));
        }
        mask
    }

    fn ink_at(mask: &GrayImage) -> Vec<(u32, u32)> {
        mask.enumerate_pixels()
            .filter(|(_, _, p)| p.0[0] != BACKGROUND)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn dilate_single_pixel_fills_kernel_around_anchor() {
        let mask = mask_with(10, 10, &[(5, 5)]);
        let grown = dilate(&mask, StructuringElement::new(3, 2));
        // Anchor (1, 1): columns 4..=6, rows 5..=6.
        let mut expected = Vec::new();
        for y in 5..=6 {
            for x in 4..=6 {
                expected.push((x, y));
            }
        }
        assert_eq!(ink_at(&grown), expected);
    }

    #[test]
    fn dilate_clips_at_image_border() {
        let mask = mask_with(5, 1, &[(0, 0)]);
        let grown = dilate(&mask, StructuringElement::horizontal(5));
        assert_eq!(ink_at(&grown), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn erode_keeps_only_pixels_with_full_support() {
        let mut ink = Vec::new();
        for x in 2..8 {
            ink.push((x, 3));
        }
        let mask = mask_with(10, 6, &ink);
        let eroded = erode(&mask, StructuringElement::horizontal(3));
        assert_eq!(ink_at(&eroded), (3..7).map(|x| (x, 3)).collect::<Vec<_>>());
    }

    #[test]
    fn erode_treats_border_as_neutral() {
        let mask = mask_with(4, 1, &[(0, 0), (1, 0), (2, 0), (3, 0)]);
        let eroded = erode(&mask, StructuringElement::horizontal(3));
        assert_eq!(count_foreground(&eroded), 4);
    }

    #[test]
    fn open_removes_runs_shorter_than_kernel() {
        let mut ink: Vec<(u32, u32)> = (0..40).map(|x| (x, 2)).collect();
        ink.extend((5..15).map(|x| (x, 6)));
        let mask = mask_with(40, 10, &ink);

        let opened = open(&mask, StructuringElement::horizontal(20), 1);
        assert_eq!(ink_at(&opened), (0..40).map(|x| (x, 2)).collect::<Vec<_>>());
    }

    #[test]
    fn open_is_idempotent_on_surviving_shapes() {
        let mut ink = Vec::new();
        for y in 2..6 {
            for x in 3..12 {
                ink.push((x, y));
            }
        }
        let mask = mask_with(16, 8, &ink);
        let element = StructuringElement::new(3, 3);
        let once = open(&mask, element, 1);
        assert_eq!(once, mask);
        assert_eq!(open(&once, element, 1), once);
    }

    #[test]
    fn identity_kernel_is_a_no_op() {
        let mask = mask_with(6, 6, &[(1, 1), (4, 2)]);
        let element = StructuringElement::new(0, 0);
        assert!(element.is_identity());
        assert_eq!(dilate(&mask, element), mask);
        assert_eq!(erode(&mask, element), mask);
    }

    #[test]
    fn subtract_and_union_are_pixelwise() {
        let a = mask_with(3, 1, &[(0, 0), (1, 0)]);
        let b = mask_with(3, 1, &[(1, 0), (2, 0)]);
        assert_eq!(ink_at(&subtract(&a, &b)), vec![(0, 0)]);
        assert_eq!(ink_at(&union(&a, &b)), vec![(0, 0), (1, 0), (2, 0)]);
    }
}
