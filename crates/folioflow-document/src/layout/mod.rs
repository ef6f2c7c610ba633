// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — pagination of classified blocks into fixed-size pages.

pub mod flow;

pub use flow::{Cursor, PageFlow, layout};
