// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text metrics — width of a text run in a given face and size.
//
// The built-in provider uses the standard Type1 Helvetica advance widths
// (1000 units per em) so wrapping matches what the PDF viewer will draw with
// the non-embedded standard fonts.

use folioflow_core::error::{FolioflowError, Result};
use folioflow_core::types::FontFace;

/// Measures rendered text width in points.
pub trait TextMetrics {
    /// Width of `text` set in `font` at `size` points.
    fn text_width(&self, text: &str, font: FontFace, size: f32) -> Result<f32>;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn text_width(&self, text: &str, font: FontFace, size: f32) -> Result<f32> {
        (**self).text_width(text, font, size)
    }
}

/// Advance width used for characters outside the tables.
const FALLBACK_WIDTH: u16 = 556;

/// Helvetica widths for ASCII 32..=126. Helvetica-Oblique shares them.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // 0 - 9
    278, 278, 584, 584, 584, 556, 1015,                                             // : - @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // A - M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // N - Z
    278, 278, 278, 469, 556, 333,                                                   // [ - `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // a - m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // n - z
    334, 260, 334, 584,                                                             // { - ~
];

/// Helvetica-Bold widths for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Metrics for the three standard Helvetica faces.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinMetrics;

impl BuiltinMetrics {
    /// Advance width of one character in 1/1000 em.
    fn advance(font: FontFace, ch: char) -> u16 {
        let table = match font {
            FontFace::Regular | FontFace::Italic => &HELVETICA,
            FontFace::Bold => &HELVETICA_BOLD,
        };
        match ch as u32 {
            code @ 32..=126 => table[(code - 32) as usize],
            _ => FALLBACK_WIDTH,
        }
    }
}

impl TextMetrics for BuiltinMetrics {
    fn text_width(&self, text: &str, font: FontFace, size: f32) -> Result<f32> {
        if !(size.is_finite() && size > 0.0) {
            return Err(FolioflowError::Measurement(format!(
                "invalid font size {size} for {}",
                font.postscript_name()
            )));
        }
        let units: u32 = text.chars().map(|ch| u32::from(Self::advance(font, ch))).sum();
        Ok(units as f32 * size / 1000.0)
    }
}
