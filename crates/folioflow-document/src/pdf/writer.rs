// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — serialise a laid-out document with `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Text uses the non-embedded standard Helvetica faces,
// matching the widths the layout engine measured with.

use std::collections::HashMap;

use folioflow_core::error::Result;
use folioflow_core::response::PDF_CONTENT_TYPE;
use folioflow_core::types::{Document, DrawCommand, FontFace, ImageFormat, Rgb};
use printpdf::{
    BuiltinFont, Color, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt,
    RawImage, RawImageData, RawImageFormat, TextItem, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use super::PageRenderer;
use crate::image::ImageProcessor;

/// Images are placed at one point per pixel before scaling.
const IMAGE_DPI: f32 = 72.0;

/// Renders [`Document`]s to PDF bytes.
pub struct PdfWriter {
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self { title: None }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Render every page of `document` and serialise the result.
    #[instrument(skip_all, fields(pages = document.page_count()))]
    pub fn write(&self, document: &Document) -> Result<Vec<u8>> {
        let title = self.title.as_deref().unwrap_or("Folioflow Document");
        info!(title, "Creating PDF");

        let mut doc = PdfDocument::new(title);
        // Each named image is decoded and embedded once, with its pixel size.
        // `None` marks an image whose pixel data failed to decode.
        let mut xobjects: HashMap<String, Option<(XObjectId, u32, u32)>> = HashMap::new();
        let mut pages = Vec::with_capacity(document.page_count());

        for page in &document.pages {
            let mut ops: Vec<Op> = Vec::new();
            for command in &page.commands {
                match command {
                    DrawCommand::Text {
                        x,
                        y,
                        font,
                        size,
                        color,
                        text,
                    } => push_text(&mut ops, *x, *y, *font, *size, *color, text),
                    DrawCommand::Image {
                        x,
                        y,
                        width,
                        height,
                        name,
                        format,
                        bytes,
                    } => {
                        let embedded = match xobjects.get(name) {
                            Some(embedded) => embedded.clone(),
                            None => {
                                let embedded = match decode_raw(bytes, *format) {
                                    Ok((raw, w, h)) => Some((doc.add_image(&raw), w, h)),
                                    Err(err) if err.is_recoverable() => {
                                        warn!(image = %name, %err, "Leaving out image with corrupt pixel data");
                                        None
                                    }
                                    Err(err) => return Err(err),
                                };
                                xobjects.insert(name.clone(), embedded.clone());
                                embedded
                            }
                        };
                        let Some((id, px_width, px_height)) = embedded else {
                            continue;
                        };
                        ops.push(Op::UseXobject {
                            id,
                            transform: XObjectTransform {
                                translate_x: Some(Pt(*x)),
                                translate_y: Some(Pt(*y)),
                                scale_x: Some(*width / px_width as f32),
                                scale_y: Some(*height / px_height as f32),
                                dpi: Some(IMAGE_DPI),
                                rotate: None,
                            },
                        });
                    }
                }
            }
            pages.push(PdfPage::new(pt_to_mm(page.width), pt_to_mm(page.height), ops));
        }

        doc.with_pages(pages);

        debug!(
            pages = doc.pages.len(),
            images = xobjects.len(),
            "PDF assembled"
        );

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf reported warnings");
        }

        Ok(output)
    }
}

impl PageRenderer for PdfWriter {
    fn render(&self, document: &Document) -> Result<Vec<u8>> {
        self.write(document)
    }

    fn content_type(&self) -> &'static str {
        PDF_CONTENT_TYPE
    }
}

fn builtin_font(face: FontFace) -> BuiltinFont {
    match face {
        FontFace::Regular => BuiltinFont::Helvetica,
        FontFace::Bold => BuiltinFont::HelveticaBold,
        FontFace::Italic => BuiltinFont::HelveticaOblique,
    }
}

fn pt_to_mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn push_text(ops: &mut Vec<Op>, x: f32, y: f32, face: FontFace, size: f32, color: Rgb, text: &str) {
    let font = builtin_font(face);
    ops.push(Op::StartTextSection);
    ops.push(Op::SetFillColor {
        col: Color::Rgb(printpdf::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
            icc_profile: None,
        }),
    });
    ops.push(Op::SetTextCursor {
        pos: Point { x: Pt(x), y: Pt(y) },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size),
        font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_owned())],
        font,
    });
    ops.push(Op::EndTextSection);
}

/// Decode an embedded image into RGB8 pixels for printpdf.
///
/// Layout only read the header, so a body that fails to decode surfaces here
/// as a recoverable image error.
fn decode_raw(bytes: &[u8], format: ImageFormat) -> Result<(RawImage, u32, u32)> {
    let processor = ImageProcessor::from_bytes(bytes, format)?;
    let (width, height) = (processor.width(), processor.height());
    let raw = RawImage {
        pixels: RawImageData::U8(processor.into_rgb8()),
        width: width as usize,
        height: height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };
    Ok((raw, width, height))
}
