// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page loader — decodes scanned or photographed pages (JPEG, PNG, TIFF, ...)
// using the `image` crate and hands the segmentation pipeline a grayscale
// raster.

use image::{DynamicImage, GrayImage, Luma};
use penline_core::error::SegmentationError;
use tracing::{debug, info, instrument};

/// A decoded page, immutable once loaded.
///
/// ```ignore
/// let page = PageImage::open("homework.jpg")?;
/// let gray = page.to_gray();
/// ```
#[derive(Debug, Clone)]
pub struct PageImage {
    image: DynamicImage,
}

impl PageImage {
    // -- Construction ---------------------------------------------------------

    /// Load a page from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, SegmentationError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            SegmentationError::ImageLoad(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Page loaded");
        Ok(Self { image: img })
    }

    /// Decode a page from raw encoded bytes.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, SegmentationError> {
        let img = image::load_from_memory(data).map_err(|err| {
            SegmentationError::ImageLoad(format!("failed to decode page image: {}", err))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Page decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Page width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Page height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Single-channel view of the page using BT.601 weights
    /// (0.299 R + 0.587 G + 0.114 B), the usual scanner/camera grayscale.
    /// Alpha is ignored; grayscale pages pass through unchanged.
    pub fn to_gray(&self) -> GrayImage {
        grayscale(&self.image)
    }
}

/// BT.601 grayscale conversion behind [`PageImage::to_gray`].
pub fn grayscale(image: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = image {
        return gray.clone();
    }
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = 0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b);
        Luma([luma.round().clamp(0.0, 255.0) as u8])
    })
}
