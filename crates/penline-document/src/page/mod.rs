// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page module — decoding scanned or photographed pages into grayscale rasters.

pub mod loader;

pub use loader::PageImage;
