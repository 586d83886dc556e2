// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Synthetic page builders shared by the segmentation tests.

use image::{GrayImage, Luma};

/// Paper brightness used by the synthetic pages.
pub const PAPER: u8 = 255;
/// Ink brightness used by the synthetic pages.
pub const INK: u8 = 0;

/// Glyph height of the hatched strokes drawn by `draw_stroke`.
pub const STROKE_HEIGHT: u32 = 20;

/// A blank page.
pub fn blank_page(width: u32, height: u32) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([PAPER]))
}

/// Fill `[x, x + width) x [y, y + height)` with `value`, clipped to the image.
pub fn fill_rect(image: &mut GrayImage, x: u32, y: u32, width: u32, height: u32, value: u8) {
    let right = (x + width).min(image.width());
    let bottom = (y + height).min(image.height());
    for py in y..bottom {
        for px in x..right {
            image.put_pixel(px, py, Luma([value]));
        }
    }
}

/// Draw a handwriting-like stroke: 4-pixel-wide vertical bars every 8 pixels,
/// `STROKE_HEIGHT` tall, filling `[x, x + width)`.
///
/// Each bar is one glyph-sized component. No run is long enough to look like
/// a ruling line, and the bars survive a 3x3 opening intact.
pub fn draw_stroke(image: &mut GrayImage, x: u32, y: u32, width: u32) {
    let mut bar = x;
    while bar + 4 <= x + width {
        fill_rect(image, bar, y, 4, STROKE_HEIGHT, INK);
        bar += 8;
    }
}

/// Draw a full-width horizontal ruling line.
pub fn draw_horizontal_rule(image: &mut GrayImage, y: u32, thickness: u32) {
    let width = image.width();
    fill_rect(image, 0, y, width, thickness, INK);
}

/// Draw a full-height vertical ruling line.
pub fn draw_vertical_rule(image: &mut GrayImage, x: u32, thickness: u32) {
    let height = image.height();
    fill_rect(image, x, 0, thickness, height, INK);
}

/// A 400x420 page with three strokes of 240 pixels starting at x = 60, at
/// y = 50, 200 and 350.
pub fn three_line_page() -> GrayImage {
    let mut page = blank_page(400, 420);
    for y in [50, 200, 350] {
        draw_stroke(&mut page, 60, y, 240);
    }
    page
}

/// `three_line_page` with two horizontal and two vertical 2-pixel rulings
/// spanning the whole page.
pub fn ruled_three_line_page() -> GrayImage {
    let mut page = three_line_page();
    draw_horizontal_rule(&mut page, 120, 2);
    draw_horizontal_rule(&mut page, 280, 2);
    draw_vertical_rule(&mut page, 10, 2);
    draw_vertical_rule(&mut page, 370, 2);
    page
}
