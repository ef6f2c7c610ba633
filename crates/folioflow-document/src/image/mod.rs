// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding embedded images and fitting them into the page.

pub mod fit;
pub mod processor;

pub use fit::{FittedSize, fit};
pub use processor::{ImageProcessor, dimensions};
