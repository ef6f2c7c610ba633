// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Folioflow.

use thiserror::Error;

/// Top-level error type for all Folioflow operations.
///
/// Only [`FolioflowError::ImageRender`] is recovered from during layout; every
/// other variant aborts the conversion and no partial output is produced.
#[derive(Debug, Error)]
pub enum FolioflowError {
    /// Missing, empty or wrong-typed upload, or an unusable layout configuration.
    #[error("invalid input: {0}")]
    Input(String),

    /// The extractor could not produce a usable block sequence.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// The text metrics provider could not measure a run.
    #[error("text measurement failed: {0}")]
    Measurement(String),

    /// A single image could not be decoded or embedded.
    #[error("image rendering failed: {0}")]
    ImageRender(String),

    /// The page renderer could not serialise the laid-out document.
    #[error("PDF rendering failed: {0}")]
    Render(String),

    /// Anything else, e.g. a panic caught at the top level.
    #[error("unexpected failure: {0}")]
    Unexpected(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FolioflowError {
    /// Whether layout may skip the failing item and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ImageRender(_))
    }

    /// Wrap a panic payload caught with `catch_unwind`.
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic with non-string payload".to_owned());
        Self::Unexpected(detail)
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FolioflowError>;
