// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line segmentation entry points.

use image::{DynamicImage, GrayImage};
use penline_core::{
    BoundingBox, LineParameters, LineRecord, Result, SegmentationConfig, SegmentationError,
};
use tracing::{info, instrument, warn};

use super::binarize::binarize;
use super::candidates::extract_candidates;
use super::denoise::denoise;
use super::glyph::estimate_glyph_height;
use super::grid::suppress_rulings;
use super::merge::merge_fragments;
use crate::page::loader::{PageImage, grayscale};

/// Everything one segmentation run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationReport {
    /// Numbered lines, `1..=N`.
    pub lines: Vec<LineRecord>,
    /// Parameters derived from the median glyph height.
    pub parameters: LineParameters,
    /// Line fragments before merging, in detection order.
    pub fragments: Vec<BoundingBox>,
}

/// Finds and numbers the lines of handwriting on a page.
///
/// Holds only an immutable, validated config; a single segmenter can be shared
/// across threads and reused for any number of pages.
///
/// ```ignore
/// let segmenter = LineSegmenter::new(SegmentationConfig::default())?;
/// for record in segmenter.segment_path("homework.jpg")? {
///     println!("{} {}", record.number, record.bounds);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LineSegmenter {
    config: SegmentationConfig,
}

impl LineSegmenter {
    /// Create a segmenter, rejecting configs the pipeline cannot run with.
    pub fn new(config: SegmentationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The config every run uses.
    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Segment an encoded page (JPEG, PNG, ...). Undecodable input fails with
    /// `ImageLoad` before any stage runs.
    pub fn segment_bytes(&self, data: &[u8]) -> Result<Vec<LineRecord>> {
        let page = PageImage::from_bytes(data)?;
        self.segment_page(&page)
    }

    /// Segment a page stored on disk.
    pub fn segment_path(&self, path: impl AsRef<std::path::Path>) -> Result<Vec<LineRecord>> {
        let page = PageImage::open(path)?;
        self.segment_page(&page)
    }

    /// Segment an already-decoded image.
    pub fn segment(&self, image: &DynamicImage) -> Result<Vec<LineRecord>> {
        Ok(self.analyze(&grayscale(image))?.lines)
    }

    /// Segment a loaded page.
    pub fn segment_page(&self, page: &PageImage) -> Result<Vec<LineRecord>> {
        Ok(self.analyze(&page.to_gray())?.lines)
    }

    /// Run every stage on a grayscale page and keep the intermediate results.
    ///
    /// ## Pipeline
    ///
    /// 1. Adaptive binarization
    /// 2. Ruling suppression
    /// 3. Speckle removal
    /// 4. Median glyph height (fails with `NoGlyphsFound`)
    /// 5. Anisotropic dilation into line fragments (fails with
    ///    `NoLineCandidates`)
    /// 6. Fragment merging and numbering
    #[instrument(skip_all, fields(width = gray.width(), height = gray.height()))]
    pub fn analyze(&self, gray: &GrayImage) -> Result<SegmentationReport> {
        let config = &self.config;

        let mask = binarize(gray, config);
        let mask = suppress_rulings(&mask, config);
        let mask = denoise(&mask, config);

        let glyph_height = estimate_glyph_height(&mask, config)?;
        let parameters = config.line_parameters(glyph_height);
        info!(
            kernel_w = parameters.kernel_width,
            kernel_h = parameters.kernel_height,
            tolerance = parameters.merge_tolerance,
            "Line parameters derived"
        );

        let fragments = extract_candidates(&mask, &parameters);
        if fragments.is_empty() {
            warn!(glyph_height, "No line fragments survived filtering");
            return Err(SegmentationError::NoLineCandidates);
        }

        let merged = merge_fragments(
            &fragments,
            parameters.merge_tolerance,
            config.merge_strategy,
        );
        let lines = LineRecord::enumerate(merged);
        info!(lines = lines.len(), "Segmentation complete");

        Ok(SegmentationReport {
            lines,
            parameters,
            fragments,
        })
    }
}

/// Find, box, and number the lines of handwriting in `image`.
pub fn segment_lines(image: &DynamicImage, config: &SegmentationConfig) -> Result<Vec<LineRecord>> {
    LineSegmenter::new(config.clone())?.segment(image)
}
