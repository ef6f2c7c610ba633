// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folioflow-document — Layout and rendering for the Folioflow engine.
//
// Classifies extracted blocks, wraps text against measured Helvetica widths,
// fits images, paginates onto fixed-size pages, and renders the result to
// PDF.

pub mod classify;
pub mod convert;
pub mod image;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod wrap;

// Re-export the primary types so callers can use `folioflow_document::Converter` etc.
pub use classify::BlockClassifier;
pub use convert::{ConvertedDocument, Converter};
pub use layout::{PageFlow, layout};
pub use metrics::{BuiltinMetrics, TextMetrics};
pub use pdf::{PageRenderer, PdfWriter};
pub use wrap::{Line, LineWrapper};
