// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folioflow — convert extracted document blocks into a paginated PDF.
//
// Entry point. Initialises logging, loads the block manifest, media directory
// and optional layout configuration, runs the conversion, and writes the PDF.
// Failures are reported on stderr as the structured JSON error body.

mod manifest;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use folioflow_core::error::{FolioflowError, Result};
use folioflow_core::{ErrorResponse, LayoutConfig};
use folioflow_document::Converter;
use tracing::{error, info};

use manifest::Manifest;

/// Lay out extracted paragraphs and images onto fixed-size PDF pages.
#[derive(Parser, Debug)]
#[command(name = "folioflow")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON manifest with the document name, blocks and relationships
    manifest: PathBuf,

    /// Directory holding the extracted media files (jpg/jpeg/png)
    #[arg(short = 'm', long = "media-dir")]
    media_dir: Option<PathBuf>,

    /// JSON layout configuration; omitted fields keep their A4 defaults
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output file; defaults to the document name with a .pdf extension
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Title stored in the PDF metadata
    #[arg(short = 't', long)]
    title: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let outcome = std::panic::catch_unwind(|| run(&args))
        .unwrap_or_else(|payload| Err(FolioflowError::from_panic(payload)));
    match outcome {
        Ok(path) => {
            info!(output = %path.display(), "Folioflow finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "Conversion failed");
            let body = ErrorResponse::from_error(&err);
            match serde_json::to_string(&body) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{}", body.message),
            }
            ExitCode::from(exit_status(&err))
        }
    }
}

fn run(args: &Args) -> Result<PathBuf> {
    let manifest = Manifest::load(&args.manifest)?;
    let images = manifest.image_table(args.media_dir.as_deref())?;
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => LayoutConfig::default(),
    };

    let mut writer = folioflow_document::PdfWriter::new();
    writer.set_title(args.title.clone().unwrap_or_else(|| manifest.name.clone()));
    let converter = Converter::new(config)?.with_renderer(writer);

    let converted = converter.convert(&manifest.name, &manifest.blocks, &images)?;
    let output = match &args.output {
        Some(path) => path.clone(),
        None => args
            .manifest
            .parent()
            .map(|dir| dir.join(&converted.filename))
            .unwrap_or_else(|| PathBuf::from(&converted.filename)),
    };
    std::fs::write(&output, &converted.bytes)?;
    info!(pages = converted.pages, "Wrote {}", output.display());
    Ok(output)
}

/// Exit status 2 for rejected input, 1 for failed conversions.
fn exit_status(err: &FolioflowError) -> u8 {
    match ErrorResponse::status(err) {
        400 => 2,
        _ => 1,
    }
}

fn load_config(path: &std::path::Path) -> Result<LayoutConfig> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        FolioflowError::Input(format!("cannot read config {}: {}", path.display(), err))
    })?;
    let config: LayoutConfig = serde_json::from_str(&raw)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_exit_with_usage_status() {
        let input = FolioflowError::Input("no manifest".into());
        let failed = FolioflowError::Extraction("bad blocks".into());
        assert_eq!(exit_status(&input), 2);
        assert_eq!(exit_status(&failed), 1);
    }

    #[test]
    fn missing_manifest_fails_before_layout() {
        let args = Args::parse_from(["folioflow", "/nonexistent/blocks.json"]);
        assert!(matches!(run(&args), Err(FolioflowError::Input(_))));
    }

    #[test]
    fn manifest_converts_to_pdf_next_to_it() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("blocks.json");
        std::fs::write(
            &manifest,
            r#"{"name": "memo.docx", "blocks": [{"text": "Memo", "heading": 1}, {"text": "Body"}]}"#,
        )
        .unwrap();
        let args = Args::parse_from(["folioflow", manifest.to_str().unwrap()]);
        let output = run(&args).unwrap();
        assert_eq!(output, dir.path().join("memo.pdf"));
        assert!(std::fs::read(&output).unwrap().starts_with(b"%PDF"));
    }
}
