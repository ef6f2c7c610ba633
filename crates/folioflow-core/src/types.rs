// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: extracted input blocks, classified blocks, and the
// paginated output document handed to the page renderer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

// -- Input from the document extractor ----------------------------------------

/// One paragraph or image as handed over by the document extractor.
///
/// Marker fields are optional so an extractor can send only what it found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBlock {
    /// Paragraph text. Explicit line breaks are encoded as `\n`.
    pub text: String,
    /// Heading marker level (1-6), if the paragraph carries one.
    pub heading: Option<u8>,
    pub bold: bool,
    pub italic: bool,
    /// Embedded image relationship id (e.g. `rId7`).
    pub image_id: Option<String>,
}

impl RawBlock {
    /// A plain body paragraph.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// A paragraph carrying only an image reference.
    pub fn image(image_id: impl Into<String>) -> Self {
        Self {
            image_id: Some(image_id.into()),
            ..Default::default()
        }
    }
}

/// Encoded image formats the layout engine can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Infer the format from a media file extension. Anything other than
    /// jpg/jpeg/png is not placeable.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// Encoded image bytes from the source package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub format: ImageFormat,
    pub bytes: Arc<[u8]>,
}

/// Images extracted from the source package, in package order.
///
/// Insertion order matters: the first-unused fallback walks the table in
/// this order.
#[derive(Debug, Clone, Default)]
pub struct ImageTable {
    entries: Vec<(String, ImageData)>,
    relationships: Vec<(String, String)>,
}

impl ImageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an image under `name`, replacing any previous entry of that name.
    pub fn insert(&mut self, name: impl Into<String>, format: ImageFormat, bytes: impl Into<Arc<[u8]>>) {
        let name = name.into();
        let data = ImageData {
            format,
            bytes: bytes.into(),
        };
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = data,
            None => self.entries.push((name, data)),
        }
    }

    /// Add a media file, inferring its format from the extension.
    ///
    /// Returns `false` (and stores nothing) for unsupported formats.
    pub fn insert_file(&mut self, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> bool {
        let name = name.into();
        let format = name
            .rsplit_once('.')
            .and_then(|(_, ext)| ImageFormat::from_extension(ext));
        match format {
            Some(format) => {
                self.insert(name, format, bytes);
                true
            }
            None => false,
        }
    }

    /// Record that relationship `id` points at media file `name`.
    pub fn link(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.relationships.push((id.into(), name.into()));
    }

    /// Media name a relationship id points at, if the mapping is known.
    pub fn target_of(&self, id: &str) -> Option<&str> {
        self.relationships
            .iter()
            .find(|(rel, _)| rel == id)
            .map(|(_, name)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&ImageData> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, data)| data)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// -- Classified blocks ----------------------------------------------------------

/// Paragraph style markers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// 0 = body text, 1-6 = heading level.
    pub heading_level: u8,
    pub bold: bool,
    /// Kept even when `bold` is also set; bold wins face selection.
    pub italic: bool,
}

/// Typeface used for a run. Selection is mutually exclusive: there is no
/// bold-italic face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

impl FontFace {
    /// Resolve style flags to a face. Bold takes precedence over italic.
    pub fn resolve(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, _) => Self::Bold,
            (false, true) => Self::Italic,
            (false, false) => Self::Regular,
        }
    }

    /// PostScript name of the standard font backing this face.
    pub fn postscript_name(&self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Italic => "Helvetica-Oblique",
        }
    }
}

/// Size class of a paragraph, derived from its heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Body,
    Heading(u8),
}

impl SizeClass {
    pub fn from_heading(level: u8) -> Self {
        if level == 0 { Self::Body } else { Self::Heading(level) }
    }
}

/// Face and point size chosen for a text block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontChoice {
    pub face: FontFace,
    pub size: f32,
}

/// Image resolved from the image table for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub name: String,
    pub format: ImageFormat,
    pub bytes: Arc<[u8]>,
}

/// A classified structural unit ready for layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text { text: String, style: Style },
    Image(ImageRef),
}

// -- Output ----------------------------------------------------------------------

/// RGB colour with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
}

/// A single placement on a page. Coordinates are PDF points with the origin
/// at the bottom-left corner; `y` is the text baseline or the image's
/// bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        x: f32,
        y: f32,
        font: FontFace,
        size: f32,
        color: Rgb,
        text: String,
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        name: String,
        format: ImageFormat,
        bytes: Arc<[u8]>,
    },
}

impl DrawCommand {
    /// Vertical anchor of the command.
    pub fn y(&self) -> f32 {
        match self {
            Self::Text { y, .. } | Self::Image { y, .. } => *y,
        }
    }
}

/// One fixed-size output page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl Page {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }
}

/// Renderer-facing event, in emission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutEvent<'a> {
    CreatePage { width: f32, height: f32 },
    Draw(&'a DrawCommand),
}

/// The paginated output. Pages are only ever appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// True when no page carries any draw command.
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|page| page.commands.is_empty())
    }

    /// Total number of draw commands across all pages.
    pub fn command_count(&self) -> usize {
        self.pages.iter().map(|page| page.commands.len()).sum()
    }

    /// Page creations interleaved with draws, exactly as a renderer would
    /// receive them.
    pub fn events(&self) -> impl Iterator<Item = LayoutEvent<'_>> {
        self.pages.iter().flat_map(|page| {
            std::iter::once(LayoutEvent::CreatePage {
                width: page.width,
                height: page.height,
            })
            .chain(page.commands.iter().map(LayoutEvent::Draw))
        })
    }
}
