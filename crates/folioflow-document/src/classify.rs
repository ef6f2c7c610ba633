// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Block classifier — turns extractor output into typed layout blocks and picks
// the face and size each text block is set in.

use std::collections::HashSet;

use folioflow_core::config::{FontSizes, ImageFallback};
use folioflow_core::error::{FolioflowError, Result};
use folioflow_core::types::{
    Block, FontChoice, FontFace, ImageRef, ImageTable, RawBlock, SizeClass, Style,
};
use tracing::{debug, warn};

/// Highest heading level recognised as a heading marker.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Face and size for a text block.
///
/// Face comes from the bold/italic flags (bold wins), size from the heading
/// level.
pub fn font_choice(style: &Style, sizes: &FontSizes) -> FontChoice {
    FontChoice {
        face: FontFace::resolve(style.bold, style.italic),
        size: sizes.size_for(SizeClass::from_heading(style.heading_level)),
    }
}

/// Classifies raw blocks against one document's image table.
///
/// Tracks which images have been placed so the first-unused fallback never
/// hands out the same image twice.
pub struct BlockClassifier<'a> {
    images: &'a ImageTable,
    fallback: ImageFallback,
    used: HashSet<String>,
}

impl<'a> BlockClassifier<'a> {
    pub fn new(images: &'a ImageTable, fallback: ImageFallback) -> Self {
        Self {
            images,
            fallback,
            used: HashSet::new(),
        }
    }

    /// Classify a single raw block.
    ///
    /// Returns `Ok(None)` for blocks with neither text nor a resolvable
    /// image. A resolved image takes the block over; an unresolved one leaves
    /// the paragraph text, if any, as a text block.
    pub fn classify(&mut self, raw: &RawBlock) -> Result<Option<Block>> {
        if let Some(id) = raw.image_id.as_deref() {
            if let Some(image) = self.resolve_image(id)? {
                return Ok(Some(Block::Image(image)));
            }
        }

        let text = raw.text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        Ok(Some(Block::Text {
            text: text.to_owned(),
            style: Style {
                heading_level: heading_level(raw.heading),
                bold: raw.bold,
                italic: raw.italic,
            },
        }))
    }

    /// Classify a whole extractor sequence, dropping empty blocks.
    pub fn classify_all(&mut self, raws: &[RawBlock]) -> Result<Vec<Block>> {
        let mut blocks = Vec::with_capacity(raws.len());
        for raw in raws {
            if let Some(block) = self.classify(raw)? {
                blocks.push(block);
            }
        }
        debug!(raw = raws.len(), classified = blocks.len(), "Blocks classified");
        Ok(blocks)
    }

    fn resolve_image(&mut self, id: &str) -> Result<Option<ImageRef>> {
        let exact = self
            .images
            .target_of(id)
            .filter(|name| self.images.get(name).is_some())
            .or_else(|| self.images.get(id).map(|_| id));

        let name = match exact {
            Some(name) => name.to_owned(),
            None => match self.fallback {
                ImageFallback::FirstUnused => {
                    match self.images.names().find(|name| !self.used.contains(*name)) {
                        Some(name) => {
                            warn!(
                                relationship = id,
                                image = name,
                                "Unresolved image relationship, using first unused image"
                            );
                            name.to_owned()
                        }
                        None => {
                            warn!(relationship = id, "Unresolved image relationship, no unused image left");
                            return Ok(None);
                        }
                    }
                }
                ImageFallback::Skip => {
                    warn!(relationship = id, "Unresolved image relationship, skipping image");
                    return Ok(None);
                }
                ImageFallback::Strict => {
                    return Err(FolioflowError::Extraction(format!(
                        "image relationship {id} does not resolve to a media file"
                    )));
                }
            },
        };

        let Some(data) = self.images.get(&name) else {
            return Ok(None);
        };
        self.used.insert(name.clone());
        Ok(Some(ImageRef {
            name,
            format: data.format,
            bytes: data.bytes.clone(),
        }))
    }
}

/// Map an optional heading marker to a level; anything outside 1-6 is body.
fn heading_level(marker: Option<u8>) -> u8 {
    match marker {
        Some(level @ 1..=MAX_HEADING_LEVEL) => level,
        Some(other) => {
            debug!(marker = other, "Ignoring out-of-range heading marker");
            0
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folioflow_core::types::ImageFormat;

    fn table() -> ImageTable {
        let mut images = ImageTable::new();
        images.insert("image1.png", ImageFormat::Png, vec![1u8]);
        images.insert("image2.jpeg", ImageFormat::Jpeg, vec![2u8]);
        images.link("rId8", "image2.jpeg");
        images
    }

    fn image_name(block: Option<Block>) -> Option<String> {
        match block {
            Some(Block::Image(image)) => Some(image.name),
            _ => None,
        }
    }

    #[test]
    fn heading_and_flags_are_kept() {
        let images = ImageTable::new();
        let mut classifier = BlockClassifier::new(&images, ImageFallback::default());
        let raw = RawBlock {
            text: "  Results ".into(),
            heading: Some(2),
            bold: true,
            italic: true,
            image_id: None,
        };
        let block = classifier.classify(&raw).unwrap().unwrap();
        let Block::Text { text, style } = block else {
            panic!("expected text block");
        };
        assert_eq!(text, "Results");
        assert_eq!(
            style,
            Style {
                heading_level: 2,
                bold: true,
                italic: true
            }
        );
        let choice = font_choice(&style, &FontSizes::default());
        assert_eq!(choice.face, FontFace::Bold);
        assert_eq!(choice.size, 18.0);
    }

    #[test]
    fn out_of_range_heading_is_body() {
        assert_eq!(heading_level(Some(7)), 0);
        assert_eq!(heading_level(Some(0)), 0);
        assert_eq!(heading_level(Some(6)), 6);
        assert_eq!(heading_level(None), 0);
    }

    #[test]
    fn font_choice_sizes() {
        let sizes = FontSizes::default();
        let italic_body = Style {
            italic: true,
            ..Style::default()
        };
        assert_eq!(
            font_choice(&italic_body, &sizes),
            FontChoice {
                face: FontFace::Italic,
                size: 12.0
            }
        );
        let h1 = Style {
            heading_level: 1,
            ..Style::default()
        };
        assert_eq!(font_choice(&h1, &sizes).face, FontFace::Regular);
        assert_eq!(font_choice(&h1, &sizes).size, 22.0);
    }

    #[test]
    fn empty_blocks_are_dropped() {
        let images = ImageTable::new();
        let mut classifier = BlockClassifier::new(&images, ImageFallback::default());
        let blocks = classifier
            .classify_all(&[RawBlock::text("   "), RawBlock::text("kept"), RawBlock::default()])
            .unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn relationship_resolves_exactly() {
        let images = table();
        let mut classifier = BlockClassifier::new(&images, ImageFallback::Strict);
        let block = classifier.classify(&RawBlock::image("rId8")).unwrap();
        assert_eq!(image_name(block).as_deref(), Some("image2.jpeg"));
        let by_name = classifier.classify(&RawBlock::image("image1.png")).unwrap();
        assert_eq!(image_name(by_name).as_deref(), Some("image1.png"));
    }

    #[test]
    fn first_unused_fallback_walks_the_table() {
        let images = table();
        let mut classifier = BlockClassifier::new(&images, ImageFallback::FirstUnused);
        let first = classifier.classify(&RawBlock::image("rId1")).unwrap();
        let second = classifier.classify(&RawBlock::image("rId2")).unwrap();
        let third = classifier.classify(&RawBlock::image("rId3")).unwrap();
        assert_eq!(image_name(first).as_deref(), Some("image1.png"));
        assert_eq!(image_name(second).as_deref(), Some("image2.jpeg"));
        assert!(third.is_none());
    }

    #[test]
    fn unresolved_image_keeps_paragraph_text() {
        let images = table();
        let mut classifier = BlockClassifier::new(&images, ImageFallback::Skip);
        let raw = RawBlock {
            text: "Figure 1".into(),
            image_id: Some("rId99".into()),
            ..RawBlock::default()
        };
        let block = classifier.classify(&raw).unwrap();
        assert!(matches!(block, Some(Block::Text { .. })));
    }

    #[test]
    fn strict_fallback_fails_extraction() {
        let images = table();
        let mut classifier = BlockClassifier::new(&images, ImageFallback::Strict);
        let err = classifier.classify(&RawBlock::image("rId99")).unwrap_err();
        assert!(matches!(err, FolioflowError::Extraction(_)));
    }
}
