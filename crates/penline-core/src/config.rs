// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Segmentation configuration and the parameters derived from it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentationError};

/// How the local average behind the adaptive threshold is weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMethod {
    /// Gaussian-weighted neighbourhood average.
    #[default]
    Gaussian,
    /// Plain box-filter mean over the neighbourhood.
    Mean,
}

/// How line fragments are grouped into finished lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Single pass over fragments sorted by top edge with one running
    /// accumulator. Order-dependent: the accumulator's center drifts as it
    /// grows.
    #[default]
    Greedy,
    /// Transitive clustering of every fragment pair whose vertical centers
    /// fall within the tolerance.
    GlobalClustering,
}

/// Tuning for the line segmentation pipeline.
///
/// Only the ruling kernel and the small cleanup kernels are fixed pixel
/// sizes. Everything downstream of glyph-size estimation is expressed as a
/// factor of the median glyph height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Weighting of the adaptive threshold's local average.
    pub threshold_method: ThresholdMethod,
    /// Side of the (odd) neighbourhood used for the local average.
    pub adaptive_block_size: u32,
    /// Constant subtracted from the local average; pixels at or below the
    /// result are ink.
    pub adaptive_offset: i32,
    /// Length of the 1-pixel-thick kernels used to find ruling lines.
    pub grid_line_length: u32,
    /// Erosion/dilation repetitions of the ruling opening.
    pub grid_open_iterations: u32,
    /// Square growth (in pixels) applied to detected rulings before removal.
    pub grid_dilate_radius: u8,
    /// Side of the (odd) square kernel used to strip speckle noise.
    pub denoise_kernel_size: u32,
    /// Components must be taller than this to count as glyphs.
    pub min_glyph_height: u32,
    /// Components at least this tall or wide are smudges, not glyphs.
    pub max_glyph_extent: u32,
    /// Dilation kernel width as a multiple of glyph height.
    pub kernel_width_factor: f64,
    /// Dilation kernel height as a multiple of glyph height.
    pub kernel_height_factor: f64,
    /// Line candidates must be taller than this multiple of glyph height.
    pub min_line_height_factor: f64,
    /// Line candidates must be wider than this multiple of glyph height.
    pub min_line_width_factor: f64,
    /// Maximum vertical-center distance, in glyph heights, for two
    /// fragments to share a line.
    pub merge_tolerance_factor: f64,
    /// Fragment grouping policy.
    pub merge_strategy: MergeStrategy,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            threshold_method: ThresholdMethod::Gaussian,
            adaptive_block_size: 15,
            adaptive_offset: 7,
            grid_line_length: 30,
            grid_open_iterations: 2,
            grid_dilate_radius: 2,
            denoise_kernel_size: 3,
            min_glyph_height: 5,
            max_glyph_extent: 200,
            kernel_width_factor: 4.0,
            kernel_height_factor: 0.4,
            min_line_height_factor: 0.5,
            min_line_width_factor: 2.0,
            merge_tolerance_factor: 5.0,
            merge_strategy: MergeStrategy::Greedy,
        }
    }
}

impl SegmentationConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.adaptive_block_size < 3 || self.adaptive_block_size % 2 == 0 {
            return Err(invalid(format!(
                "adaptive_block_size must be odd and at least 3, got {}",
                self.adaptive_block_size
            )));
        }
        if self.grid_line_length == 0 {
            return Err(invalid("grid_line_length must be positive".into()));
        }
        if self.grid_open_iterations == 0 {
            return Err(invalid("grid_open_iterations must be positive".into()));
        }
        if self.denoise_kernel_size == 0
            || self.denoise_kernel_size % 2 == 0
            || self.denoise_kernel_size > 511
        {
            return Err(invalid(format!(
                "denoise_kernel_size must be odd and in 1..=511, got {}",
                self.denoise_kernel_size
            )));
        }
        if self.min_glyph_height >= self.max_glyph_extent {
            return Err(invalid(format!(
                "min_glyph_height ({}) must be below max_glyph_extent ({})",
                self.min_glyph_height, self.max_glyph_extent
            )));
        }

        let factors = [
            ("kernel_width_factor", self.kernel_width_factor),
            ("kernel_height_factor", self.kernel_height_factor),
            ("min_line_height_factor", self.min_line_height_factor),
            ("min_line_width_factor", self.min_line_width_factor),
            ("merge_tolerance_factor", self.merge_tolerance_factor),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Derive the line-extraction parameters for a page whose median glyph
    /// height is `glyph_height`.
    pub fn line_parameters(&self, glyph_height: f64) -> LineParameters {
        let scaled = |factor: f64| (glyph_height * factor) as u32;
        LineParameters {
            glyph_height,
            kernel_width: scaled(self.kernel_width_factor).max(1),
            kernel_height: scaled(self.kernel_height_factor).max(1),
            min_width: scaled(self.min_line_width_factor),
            min_height: scaled(self.min_line_height_factor),
            merge_tolerance: glyph_height * self.merge_tolerance_factor,
        }
    }
}

fn invalid(detail: String) -> SegmentationError {
    SegmentationError::InvalidConfig(detail)
}

/// Pixel-scale parameters derived from the median glyph height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineParameters {
    /// The median glyph height these parameters were derived from.
    pub glyph_height: f64,
    /// Dilation kernel width, at least 1.
    pub kernel_width: u32,
    /// Dilation kernel height, at least 1.
    pub kernel_height: u32,
    /// Candidates must be strictly wider than this.
    pub min_width: u32,
    /// Candidates must be strictly taller than this.
    pub min_height: u32,
    /// Vertical-center distance below which fragments merge.
    pub merge_tolerance: f64,
}
