// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion endpoint surface: attachment naming and the structured error
// body returned when a conversion fails.

use serde::{Deserialize, Serialize};

use crate::error::FolioflowError;

/// Content type of a successful conversion.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Derive the download name: the last extension is replaced by `.pdf`.
///
/// Leading dots (hidden files) are not treated as an extension separator.
pub fn attachment_filename(input_name: &str) -> String {
    let file_name = input_name.rsplit(['/', '\\']).next().unwrap_or(input_name);
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => format!("{}.pdf", &file_name[..idx]),
        _ => format!("{file_name}.pdf"),
    }
}

/// JSON body sent back to the caller on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short summary suitable for display.
    pub message: String,
    /// Diagnostic detail, where available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Map a conversion error to its response body.
    pub fn from_error(err: &FolioflowError) -> Self {
        match err {
            FolioflowError::Input(detail) => Self {
                message: "Invalid request type".into(),
                error: Some(detail.clone()),
            },
            other => Self {
                message: "Failed to convert Word to PDF".into(),
                error: Some(other.to_string()),
            },
        }
    }

    /// HTTP-style status class: 400 for input errors, 500 otherwise.
    pub fn status(err: &FolioflowError) -> u16 {
        match err {
            FolioflowError::Input(_) => 400,
            _ => 500,
        }
    }
}
