// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Block manifest — the extractor's output as a JSON file on disk.

use std::collections::BTreeMap;
use std::path::Path;

use folioflow_core::error::{FolioflowError, Result};
use folioflow_core::types::{ImageTable, RawBlock};
use serde::Deserialize;
use tracing::{debug, warn};

/// Extractor output for one source document.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    /// Original upload name, e.g. `report.docx`.
    pub name: String,
    #[serde(default)]
    pub blocks: Vec<RawBlock>,
    /// Relationship id to media file name.
    #[serde(default)]
    pub relationships: BTreeMap<String, String>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            FolioflowError::Input(format!("cannot read manifest {}: {}", path.display(), err))
        })?;
        serde_json::from_str(&raw)
            .map_err(|err| FolioflowError::Extraction(format!("malformed manifest: {err}")))
    }

    /// Load supported media files from `media_dir`, in file name order, and
    /// attach the manifest's relationships.
    pub fn image_table(&self, media_dir: Option<&Path>) -> Result<ImageTable> {
        let mut table = ImageTable::new();
        for (id, name) in &self.relationships {
            table.link(id, name);
        }
        let Some(dir) = media_dir else {
            return Ok(table);
        };

        let mut entries = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();

        for path in entries.into_iter().filter(|p| p.is_file()) {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let bytes = std::fs::read(&path)?;
            if table.insert_file(name, bytes) {
                debug!(image = name, "Loaded media file");
            } else {
                warn!(file = name, "Ignoring unsupported media file");
            }
        }
        Ok(table)
    }
}
