// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end conversion: extractor output in, named PDF attachment out.
//
// Every failure except an undecodable image aborts the conversion; nothing
// partial is returned and nothing is retried.

use folioflow_core::config::LayoutConfig;
use folioflow_core::error::{FolioflowError, Result};
use folioflow_core::response::attachment_filename;
use folioflow_core::types::{Document, ImageTable, RawBlock};
use tracing::{info, instrument};

use crate::classify::BlockClassifier;
use crate::layout::layout;
use crate::metrics::{BuiltinMetrics, TextMetrics};
use crate::pdf::{PageRenderer, PdfWriter};

/// A finished conversion, ready to send back as an attachment.
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    /// Input name with its extension replaced by `.pdf`.
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Runs classification, layout and rendering with one configuration.
///
/// Holds no per-document state, so a single converter can serve concurrent
/// conversions.
pub struct Converter {
    config: LayoutConfig,
    metrics: Box<dyn TextMetrics + Send + Sync>,
    renderer: Box<dyn PageRenderer + Send + Sync>,
}

impl Converter {
    /// Converter using the built-in Helvetica metrics and the PDF writer.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            metrics: Box::new(BuiltinMetrics),
            renderer: Box::new(PdfWriter::new()),
        })
    }

    /// Replace the text metrics provider.
    pub fn with_metrics(mut self, metrics: impl TextMetrics + Send + Sync + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    /// Replace the page renderer.
    pub fn with_renderer(mut self, renderer: impl PageRenderer + Send + Sync + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Classify and paginate without rendering.
    pub fn layout(&self, blocks: &[RawBlock], images: &ImageTable) -> Result<Document> {
        let mut classifier = BlockClassifier::new(images, self.config.image_fallback);
        let classified = classifier.classify_all(blocks)?;
        layout(&classified, &self.config, &*self.metrics)
    }

    /// Convert the extracted content of `input_name` into a rendered
    /// attachment.
    #[instrument(skip(self, blocks, images), fields(blocks = blocks.len(), images = images.len()))]
    pub fn convert(
        &self,
        input_name: &str,
        blocks: &[RawBlock],
        images: &ImageTable,
    ) -> Result<ConvertedDocument> {
        if input_name.trim().is_empty() {
            return Err(FolioflowError::Input("No file uploaded".into()));
        }

        let document = self.layout(blocks, images)?;
        let bytes = self.renderer.render(&document)?;
        if bytes.is_empty() {
            return Err(FolioflowError::Render("renderer produced no output".into()));
        }
        let converted = ConvertedDocument {
            filename: attachment_filename(input_name),
            content_type: self.renderer.content_type(),
            bytes,
            pages: document.page_count(),
        };

        info!(
            filename = %converted.filename,
            pages = converted.pages,
            bytes = converted.bytes.len(),
            "Conversion complete"
        );
        Ok(converted)
    }
}
