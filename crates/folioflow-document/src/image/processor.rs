// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — reads embedded JPEG/PNG bytes with the `image` crate.
// Layout only probes the header for natural dimensions; the PDF writer does
// the one full decode to RGB pixels.

use std::io::Cursor;

use folioflow_core::error::{FolioflowError, Result};
use folioflow_core::types::ImageFormat;
use image::{DynamicImage, ImageReader};
use tracing::{debug, instrument};

/// A decoded embedded image.
pub struct ImageProcessor {
    image: DynamicImage,
}

fn reader(data: &[u8], format: ImageFormat) -> ImageReader<Cursor<&[u8]>> {
    let mut reader = ImageReader::new(Cursor::new(data));
    reader.set_format(match format {
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Png => image::ImageFormat::Png,
    });
    reader
}

/// Natural size in pixels, read from the image header without decoding
/// pixel data.
pub fn dimensions(data: &[u8], format: ImageFormat) -> Result<(u32, u32)> {
    let (width, height) = reader(data, format).into_dimensions().map_err(|err| {
        FolioflowError::ImageRender(format!(
            "unreadable {} header: {}",
            format.mime_type(),
            err
        ))
    })?;
    if width == 0 || height == 0 {
        return Err(FolioflowError::ImageRender("image has zero area".into()));
    }
    Ok((width, height))
}

impl ImageProcessor {
    /// Decode `data` as `format`.
    ///
    /// Any decoding problem is an [`FolioflowError::ImageRender`] so layout can
    /// skip the image and continue.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8], format: ImageFormat) -> Result<Self> {
        let image = reader(data, format).decode().map_err(|err| {
            FolioflowError::ImageRender(format!(
                "failed to decode {}: {}",
                format.mime_type(),
                err
            ))
        })?;
        if image.width() == 0 || image.height() == 0 {
            return Err(FolioflowError::ImageRender("image has zero area".into()));
        }
        debug!(
            width = image.width(),
            height = image.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image })
    }

    /// Width in pixels, placed at one point per pixel.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels, placed at one point per pixel.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor, returning tightly packed RGB8 pixels.
    pub fn into_rgb8(self) -> Vec<u8> {
        self.image.to_rgb8().into_raw()
    }
}
