// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout configuration: page geometry, type sizes, and image fallback policy.

use serde::{Deserialize, Serialize};

use crate::error::{FolioflowError, Result};
use crate::types::{Rgb, SizeClass};

/// What to do with an image block whose relationship id cannot be resolved
/// to a media file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFallback {
    /// Use the first image in the table not yet placed. Approximate; every
    /// use is logged as a mismatch.
    #[default]
    FirstUnused,
    /// Drop the image block.
    Skip,
    /// Fail the conversion with an extraction error.
    Strict,
}

/// Point sizes per paragraph class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub heading1: f32,
    pub heading2: f32,
    /// Headings of level 3 and deeper.
    pub heading3_plus: f32,
    pub body: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            heading1: 22.0,
            heading2: 18.0,
            heading3_plus: 16.0,
            body: 12.0,
        }
    }
}

impl FontSizes {
    pub fn size_for(&self, class: SizeClass) -> f32 {
        match class {
            SizeClass::Body => self.body,
            SizeClass::Heading(1) => self.heading1,
            SizeClass::Heading(2) => self.heading2,
            SizeClass::Heading(_) => self.heading3_plus,
        }
    }
}

/// Geometry and typography for one layout pass. All lengths are PDF points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Inset from every page edge.
    pub margin: f32,
    /// Vertical advance per wrapped line, independent of font size.
    pub line_height: f32,
    /// Cap on displayed image height, independent of remaining page space.
    pub max_image_height: f32,
    /// Extra gap left below each placed image.
    pub image_spacing: f32,
    pub font_sizes: FontSizes,
    pub text_color: Rgb,
    pub image_fallback: ImageFallback,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::a4()
    }
}

impl LayoutConfig {
    /// A4 portrait (595 x 842 pt) with 50 pt margins.
    pub fn a4() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 50.0,
            line_height: 16.0,
            max_image_height: 300.0,
            image_spacing: 20.0,
            font_sizes: FontSizes::default(),
            text_color: Rgb::BLACK,
            image_fallback: ImageFallback::default(),
        }
    }

    /// US Letter portrait (612 x 792 pt), otherwise identical to A4.
    pub fn letter() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            ..Self::a4()
        }
    }

    /// Printable width between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Cursor position at the top of a fresh page.
    pub fn top(&self) -> f32 {
        self.page_height - self.margin
    }

    /// Reject geometry that leaves no room to draw.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("line_height", self.line_height),
            ("max_image_height", self.max_image_height),
            ("font_sizes.body", self.font_sizes.body),
            ("font_sizes.heading1", self.font_sizes.heading1),
            ("font_sizes.heading2", self.font_sizes.heading2),
            ("font_sizes.heading3_plus", self.font_sizes.heading3_plus),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(FolioflowError::Input(format!(
                    "{name} must be a positive length, got {value}"
                )));
            }
        }
        for (name, value) in [("margin", self.margin), ("image_spacing", self.image_spacing)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FolioflowError::Input(format!(
                    "{name} must be a non-negative length, got {value}"
                )));
            }
        }
        if self.content_width() <= 0.0 || self.top() <= self.margin {
            return Err(FolioflowError::Input(format!(
                "margin {} leaves no content area on a {}x{} page",
                self.margin, self.page_width, self.page_height
            )));
        }
        // A capped image must always fit on a fresh page.
        if self.max_image_height > self.top() - self.margin {
            return Err(FolioflowError::Input(format!(
                "max_image_height {} exceeds the {} pt content height",
                self.max_image_height,
                self.top() - self.margin
            )));
        }
        Ok(())
    }
}
