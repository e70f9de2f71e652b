// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// A white RGB surface that QR codes and text are composed onto, and that
// encodes itself as a PNG carrying its print resolution.

use std::io::Write;
use std::path::Path;

use assetlabel_core::error::{LabelError, Result};
use image::imageops;
use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use tracing::{debug, instrument};

use crate::font::LabelFont;

const METRES_PER_INCH: f64 = 0.0254;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// In-memory label image plus the DPI it is meant to be printed at.
pub struct LabelCanvas {
    image: RgbImage,
    dpi: u32,
}

impl LabelCanvas {
    // -- Construction ---------------------------------------------------------

    /// A white canvas of `width` x `height` pixels.
    pub fn blank(width: u32, height: u32, dpi: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, WHITE),
            dpi,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn as_rgb(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_rgb(self) -> RgbImage {
        self.image
    }

    // -- Composition ----------------------------------------------------------

    /// Copy a grayscale image onto the canvas with its top-left at `(x, y)`,
    /// replacing whatever was underneath.
    pub fn paste(&mut self, tile: GrayImage, x: i32, y: i32) {
        let tile = DynamicImage::ImageLuma8(tile).into_rgb8();
        imageops::replace(&mut self.image, &tile, i64::from(x), i64::from(y));
    }

    /// Draw black text with its top-left corner at `origin`.
    pub fn draw_text(&mut self, font: &LabelFont, origin: (i32, i32), text: &str, size_px: f32) {
        font.draw(&mut self.image, origin, text, size_px, BLACK);
    }

    // -- Output ---------------------------------------------------------------

    /// Encode as PNG with a `pHYs` chunk for the canvas DPI.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        encode_png(&self.image, self.dpi, &mut buffer)?;
        Ok(buffer)
    }

    /// Write the PNG to `path`, replacing any existing file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|err| {
            LabelError::Image(format!("failed to create {}: {}", path.display(), err))
        })?;
        encode_png(&self.image, self.dpi, std::io::BufWriter::new(file))?;
        debug!(width = self.width(), height = self.height(), dpi = self.dpi, "label saved");
        Ok(())
    }
}

/// Pixels per metre for the PNG `pHYs` chunk.
pub fn pixels_per_metre(dpi: u32) -> u32 {
    (f64::from(dpi) / METRES_PER_INCH).round() as u32
}

fn encode_png(image: &RgbImage, dpi: u32, writer: impl Write) -> Result<()> {
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let ppm = pixels_per_metre(dpi);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));

    let mut png_writer = encoder
        .write_header()
        .map_err(|err| LabelError::Image(format!("PNG header: {}", err)))?;
    png_writer
        .write_image_data(image.as_raw())
        .map_err(|err| LabelError::Image(format!("PNG encoding failed: {}", err)))?;
    png_writer
        .finish()
        .map_err(|err| LabelError::Image(format!("PNG finish: {}", err)))
}
