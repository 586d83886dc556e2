// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local-adaptive binarization of grayscale pages into ink masks.

use image::{GrayImage, Luma};
use imageproc::filter::separable_filter_equal;
use penline_core::{SegmentationConfig, ThresholdMethod};
use tracing::{debug, instrument};

use super::morphology::{BACKGROUND, FOREGROUND, count_foreground};

/// Classify each pixel as ink when it is at least `adaptive_offset` darker
/// than the average of its `adaptive_block_size` neighbourhood.
///
/// The threshold moves with the local average, so shadows and uneven lighting
/// across a photographed page do not swallow whole regions.
#[instrument(skip_all, fields(method = ?config.threshold_method, block = config.adaptive_block_size))]
pub fn binarize(gray: &GrayImage, config: &SegmentationConfig) -> GrayImage {
    let local = match config.threshold_method {
        ThresholdMethod::Gaussian => gaussian_average(gray, config.adaptive_block_size),
        ThresholdMethod::Mean => box_average(gray, config.adaptive_block_size / 2),
    };

    let offset = config.adaptive_offset;
    let mask = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let pixel = i32::from(gray.get_pixel(x, y).0[0]);
        let threshold = i32::from(local.get_pixel(x, y).0[0]) - offset;
        Luma([if pixel <= threshold { FOREGROUND } else { BACKGROUND }])
    });

    debug!(ink_pixels = count_foreground(&mask), "Binarization complete");
    mask
}

/// Gaussian-weighted average over exactly `block_size` x `block_size`
/// pixels, with the sigma conventionally paired with that aperture. Edge
/// pixels are replicated.
fn gaussian_average(gray: &GrayImage, block_size: u32) -> GrayImage {
    separable_filter_equal(gray, &gaussian_kernel(block_size))
}

/// Normalized `block_size`-tap Gaussian kernel.
fn gaussian_kernel(block_size: u32) -> Vec<f32> {
    let sigma = 0.3 * ((block_size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let radius = (block_size / 2) as i32;
    let taps: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let total: f32 = taps.iter().sum();
    taps.into_iter().map(|w| w / total).collect()
}

/// Box-filter mean over a `(2 * radius + 1)` square. Edge pixels are
/// replicated, so every window averages the same number of samples.
fn box_average(gray: &GrayImage, radius: u32) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return gray.clone();
    }
    let padded = replicate_border(gray, radius);
    let integral = compute_integral_image(&padded);
    let stride = (padded.width() + 1) as usize;
    let side = (2 * radius + 1) as usize;
    let area = (side * side) as f64;

    GrayImage::from_fn(width, height, |x, y| {
        // Pixel (x, y) sits at (x + radius, y + radius) in the padded image,
        // so its window starts at (x, y) there.
        let (x1, y1) = (x as usize, y as usize);
        let (x2, y2) = (x1 + side, y1 + side);
        let sum = integral[y2 * stride + x2] + integral[y1 * stride + x1]
            - integral[y1 * stride + x2]
            - integral[y2 * stride + x1];
        Luma([(sum as f64 / area).round().clamp(0.0, 255.0) as u8])
    })
}

/// `gray` surrounded by `radius` pixels copied from its nearest edge.
fn replicate_border(gray: &GrayImage, radius: u32) -> GrayImage {
    let (width, height) = gray.dimensions();
    GrayImage::from_fn(width + 2 * radius, height + 2 * radius, |x, y| {
        let sx = x.saturating_sub(radius).min(width - 1);
        let sy = y.saturating_sub(radius).min(height - 1);
        *gray.get_pixel(sx, sy)
    })
}

/// Summed-area table of the padded page, `(width+1) x (height+1)` with a zero
/// first row and column: entry `(x, y)` holds the sum over `[0, x) x [0, y)`.
fn compute_integral_image(gray: &GrayImage) -> Vec<u64> {
    let (w, h) = gray.dimensions();
    let stride = (w + 1) as usize;
    let mut table = vec![0u64; stride * (h + 1) as usize];

    for y in 0..h {
        let mut row_sum: u64 = 0;
        for x in 0..w {
            row_sum += u64::from(gray.get_pixel(x, y).0[0]);
            let idx = (y + 1) as usize * stride + (x + 1) as usize;
            table[idx] = row_sum + table[idx - stride];
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::fixtures::{blank_page, fill_rect};

    fn config_with(method: ThresholdMethod) -> SegmentationConfig {
        SegmentationConfig {
            threshold_method: method,
            ..Default::default()
        }
    }

    #[test]
    fn blank_page_has_no_ink() {
        for method in [ThresholdMethod::Gaussian, ThresholdMethod::Mean] {
            let mask = binarize(&blank_page(64, 48), &config_with(method));
            assert_eq!(count_foreground(&mask), 0, "{method:?}");
        }
    }

    #[test]
    fn thin_dark_stroke_becomes_ink() {
        let mut page = blank_page(60, 40);
        fill_rect(&mut page, 10, 18, 40, 3, 20);

        for method in [ThresholdMethod::Gaussian, ThresholdMethod::Mean] {
            let mask = binarize(&page, &config_with(method));
            assert_eq!(mask.get_pixel(30, 19).0[0], FOREGROUND, "{method:?}");
            assert_eq!(mask.get_pixel(30, 5).0[0], BACKGROUND, "{method:?}");
            assert_eq!(count_foreground(&mask), 40 * 3, "{method:?}");
        }
    }

    #[test]
    fn threshold_follows_uneven_illumination() {
        // Left half lit, right half in shadow; one stroke in each half is only
        // slightly darker than its surroundings.
        let mut page = blank_page(120, 40);
        fill_rect(&mut page, 60, 0, 60, 40, 110);
        fill_rect(&mut page, 20, 18, 20, 2, 200);
        fill_rect(&mut page, 80, 18, 20, 2, 60);

        let mask = binarize(&page, &config_with(ThresholdMethod::Mean));
        assert_eq!(mask.get_pixel(30, 18).0[0], FOREGROUND);
        assert_eq!(mask.get_pixel(90, 18).0[0], FOREGROUND);
        // The shadowed paper itself is not ink.
        assert_eq!(mask.get_pixel(100, 35).0[0], BACKGROUND);
    }

    #[test]
    fn gaussian_window_spans_the_whole_block() {
        // A dark column exactly block/2 = 7 pixels right of (20, 20) still
        // pulls the average down; one at 8 pixels is outside the window.
        let mut near = blank_page(41, 41);
        fill_rect(&mut near, 27, 13, 1, 15, 0);
        let mut far = blank_page(41, 41);
        fill_rect(&mut far, 28, 13, 1, 15, 0);

        let near_avg = gaussian_average(&near, 15).get_pixel(20, 20).0[0];
        let far_avg = gaussian_average(&far, 15).get_pixel(20, 20).0[0];
        assert!(near_avg < 255, "near {near_avg}");
        assert!(near_avg < far_avg, "near {near_avg}, far {far_avg}");
    }

    #[test]
    fn gaussian_kernel_has_block_size_taps() {
        let kernel = gaussian_kernel(15);
        assert_eq!(kernel.len(), 15);
        assert!((kernel.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert_eq!(kernel[0], kernel[14]);
        assert!(kernel[7] > kernel[6]);
    }

    #[test]
    fn box_average_replicates_edge_pixels() {
        // Dark left column: at (0, 10) the 15x15 window sees it 8 times
        // (itself plus 7 replicated copies) out of 15 columns.
        let mut page = blank_page(20, 20);
        fill_rect(&mut page, 0, 0, 1, 20, 0);
        let mean = box_average(&page, 7).get_pixel(0, 10).0[0];
        assert_eq!(mean, 119);
    }

    #[test]
    fn box_average_of_flat_page_is_flat() {
        let page = GrayImage::from_pixel(9, 6, Luma([90]));
        assert!(box_average(&page, 7).pixels().all(|p| p.0[0] == 90));
    }
}
