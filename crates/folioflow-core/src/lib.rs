// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folioflow — Core types, configuration and error definitions shared across crates.

pub mod config;
pub mod error;
pub mod response;
pub mod types;

pub use config::{FontSizes, ImageFallback, LayoutConfig};
pub use error::FolioflowError;
pub use response::ErrorResponse;
pub use types::*;
