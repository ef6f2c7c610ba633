// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page flow controller.
//
// A single ordered pass over the classified blocks. The only mutable state is
// the vertical cursor on the current page and the append-only output
// document; a new page resets the cursor to the top margin.

use folioflow_core::config::LayoutConfig;
use folioflow_core::error::Result;
use folioflow_core::types::{Block, Document, DrawCommand, ImageRef, Page, Style};
use tracing::{debug, instrument, warn};

use crate::classify::font_choice;
use crate::image::{dimensions, fit};
use crate::metrics::TextMetrics;
use crate::wrap::LineWrapper;

/// Drawing position on the current page, in points from the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
}

/// Pagination state for one document.
pub struct PageFlow<'c> {
    config: &'c LayoutConfig,
    document: Document,
    cursor: Cursor,
}

impl<'c> PageFlow<'c> {
    pub fn new(config: &'c LayoutConfig) -> Self {
        Self {
            config,
            document: Document::default(),
            cursor: Cursor {
                x: config.margin,
                y: config.top(),
            },
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Lay out one block.
    ///
    /// Text measurement failures propagate; image failures are logged and
    /// the image skipped.
    pub fn place<M: TextMetrics + ?Sized>(&mut self, block: &Block, metrics: &M) -> Result<()> {
        match block {
            Block::Text { text, style } => self.place_text(text, style, metrics),
            Block::Image(image) => {
                self.place_image(image);
                Ok(())
            }
        }
    }

    /// Lay out a paragraph. Each `\n`-separated part is wrapped separately
    /// and followed by half a line of spacing; the block as a whole gets
    /// another half line.
    pub fn place_text<M: TextMetrics + ?Sized>(
        &mut self,
        text: &str,
        style: &Style,
        metrics: &M,
    ) -> Result<()> {
        let config = self.config;
        let choice = font_choice(style, &config.font_sizes);
        let wrapper = LineWrapper::new(metrics, choice.face, choice.size, config.content_width());
        let half_line = config.line_height / 2.0;

        for part in text.split('\n') {
            for line in wrapper.lines(part) {
                let line = line?;
                if self.document.pages.is_empty() || self.cursor.y < config.margin {
                    self.new_page();
                }
                self.push(DrawCommand::Text {
                    x: config.margin,
                    y: self.cursor.y,
                    font: choice.face,
                    size: choice.size,
                    color: config.text_color,
                    text: line.text,
                });
                self.cursor.y -= config.line_height;
            }
            self.cursor.y -= half_line;
        }
        self.cursor.y -= half_line;
        Ok(())
    }

    /// Place an image centred horizontally, breaking the page first if it
    /// would run into the bottom margin. Unreadable images leave the flow
    /// untouched.
    pub fn place_image(&mut self, image: &ImageRef) {
        let (natural_width, natural_height) = match dimensions(&image.bytes, image.format) {
            Ok(size) => size,
            Err(err) => {
                warn!(image = %image.name, %err, "Skipping image that failed to render");
                return;
            }
        };

        let config = self.config;
        let max_width = config.content_width();
        let size = fit(
            natural_width as f32,
            natural_height as f32,
            max_width,
            config.max_image_height,
        );

        if self.document.pages.is_empty() || self.cursor.y - size.height < config.margin {
            self.new_page();
        }

        let x = config.margin + (max_width - size.width) / 2.0;
        self.push(DrawCommand::Image {
            x,
            y: self.cursor.y - size.height,
            width: size.width,
            height: size.height,
            name: image.name.clone(),
            format: image.format,
            bytes: image.bytes.clone(),
        });
        self.cursor.y -= size.height + config.image_spacing;
    }

    /// Append a fresh page and move the cursor to its top margin.
    fn new_page(&mut self) {
        let config = self.config;
        self.document
            .pages
            .push(Page::new(config.page_width, config.page_height));
        self.cursor = Cursor {
            x: config.margin,
            y: config.top(),
        };
        debug!(page = self.document.pages.len(), "Started page");
    }

    fn push(&mut self, command: DrawCommand) {
        if let Some(page) = self.document.pages.last_mut() {
            page.commands.push(command);
        }
    }

    /// Finish layout. A document with no content still gets one blank page.
    pub fn finish(mut self) -> Document {
        if self.document.pages.is_empty() {
            self.new_page();
        }
        self.document
    }
}

/// Lay out `blocks` in order, aborting on the first unrecoverable error.
#[instrument(skip_all, fields(blocks = blocks.len()))]
pub fn layout<M: TextMetrics + ?Sized>(
    blocks: &[Block],
    config: &LayoutConfig,
    metrics: &M,
) -> Result<Document> {
    let mut flow = PageFlow::new(config);
    for block in blocks {
        flow.place(block, metrics)?;
    }
    let document = flow.finish();
    debug!(
        pages = document.page_count(),
        commands = document.command_count(),
        "Layout complete"
    );
    Ok(document)
}
