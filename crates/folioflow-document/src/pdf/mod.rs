// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — serialising laid-out documents.

pub mod writer;

use folioflow_core::error::Result;
use folioflow_core::types::Document;

pub use writer::PdfWriter;

/// Turns a laid-out document into the final fixed page format.
pub trait PageRenderer {
    fn render(&self, document: &Document) -> Result<Vec<u8>>;

    /// MIME type of the bytes produced by [`PageRenderer::render`].
    fn content_type(&self) -> &'static str;
}
