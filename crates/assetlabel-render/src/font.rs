// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text faces for label rendering.
//
// A TrueType face is used when the configured font file is present and
// parses; otherwise text is drawn with the built-in 8x8 bitmap face. Both
// paths measure and draw through the same interface, so a missing font costs
// looks, never a label.

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use assetlabel_core::FontSpec;
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect as PixelRect;
use tracing::{debug, warn};

/// Edge length of a bitmap glyph cell.
const BITMAP_CELL: u32 = 8;

/// Nominal pixel size covered by one bitmap magnification step.
const BITMAP_STEP_PX: f32 = 16.0;

/// Each shrink step while fitting a title keeps this share of the size.
const SHRINK_FACTOR: f32 = 0.9;

enum Face {
    TrueType(FontVec),
    Bitmap,
}

/// A face together with the size it is normally drawn at.
pub struct LabelFont {
    face: Face,
    size_px: f32,
}

/// Text after fitting it into a width budget.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub text: String,
    pub size_px: f32,
    pub width: u32,
    pub height: u32,
}

impl LabelFont {
    /// Load the face named by `spec`, falling back to the bitmap face when
    /// the file cannot be found or parsed.
    pub fn load(spec: &FontSpec, search_dirs: &[PathBuf]) -> Self {
        let Some(path) = spec.locate(search_dirs) else {
            warn!(
                font = %spec.file.display(),
                "font not found, using built-in bitmap face"
            );
            return Self::bitmap(spec.size_px);
        };
        match read_face(&path) {
            Ok(face) => {
                debug!(path = %path.display(), size_px = spec.size_px, "font loaded");
                Self::truetype(face, spec.size_px)
            }
            Err(reason) => {
                warn!(
                    path = %path.display(),
                    reason = %reason,
                    "font unusable, using built-in bitmap face"
                );
                Self::bitmap(spec.size_px)
            }
        }
    }

    pub fn truetype(face: FontVec, size_px: f32) -> Self {
        Self {
            face: Face::TrueType(face),
            size_px,
        }
    }

    pub fn bitmap(size_px: f32) -> Self {
        Self {
            face: Face::Bitmap,
            size_px,
        }
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self.face, Face::Bitmap)
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Width and height of `text` drawn at `size_px`.
    pub fn measure(&self, text: &str, size_px: f32) -> (u32, u32) {
        match &self.face {
            Face::TrueType(face) => text_size(PxScale::from(size_px), face, text),
            Face::Bitmap => {
                let cell = BITMAP_CELL * magnification(size_px);
                (text.chars().count() as u32 * cell, cell)
            }
        }
    }

    /// Draw `text` with its top-left corner at `origin`. Pixels falling off
    /// the canvas are clipped.
    pub fn draw(&self, canvas: &mut RgbImage, origin: (i32, i32), text: &str, size_px: f32, color: Rgb<u8>) {
        match &self.face {
            Face::TrueType(face) => {
                draw_text_mut(canvas, color, origin.0, origin.1, PxScale::from(size_px), face, text);
            }
            Face::Bitmap => draw_bitmap_text(canvas, origin, text, magnification(size_px), color),
        }
    }

    /// Fit `text` into `max_width`: shrink from the nominal size towards
    /// `min_size_px`, then drop trailing characters if it is still too wide.
    pub fn fit(&self, text: &str, max_width: u32, min_size_px: f32) -> FittedText {
        let mut size_px = self.size_px;
        let (mut width, mut height) = self.measure(text, size_px);
        while width > max_width {
            let next = size_px * SHRINK_FACTOR;
            if next < min_size_px {
                break;
            }
            size_px = next;
            (width, height) = self.measure(text, size_px);
        }

        let mut chars: Vec<char> = text.chars().collect();
        while width > max_width && !chars.is_empty() {
            chars.pop();
            let candidate: String = chars.iter().collect();
            (width, height) = self.measure(&candidate, size_px);
        }

        FittedText {
            text: chars.into_iter().collect(),
            size_px,
            width,
            height,
        }
    }
}

fn read_face(path: &Path) -> Result<FontVec, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    FontVec::try_from_vec(bytes).map_err(|e| e.to_string())
}

/// Whole-pixel scale of the bitmap face for a nominal size.
fn magnification(size_px: f32) -> u32 {
    ((size_px / BITMAP_STEP_PX) as u32).max(1)
}

fn bitmap_glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn draw_bitmap_text(canvas: &mut RgbImage, origin: (i32, i32), text: &str, scale: u32, color: Rgb<u8>) {
    let advance = (BITMAP_CELL * scale) as i32;
    for (index, c) in text.chars().enumerate() {
        let glyph_x = origin.0 + index as i32 * advance;
        for (row, bits) in bitmap_glyph(c).iter().enumerate() {
            for col in 0..BITMAP_CELL {
                // Bit 0 is the leftmost pixel of the row.
                if bits & (1u8 << col) == 0 {
                    continue;
                }
                let x = glyph_x + (col * scale) as i32;
                let y = origin.1 + (row as u32 * scale) as i32;
                draw_filled_rect_mut(canvas, PixelRect::at(x, y).of_size(scale, scale), color);
            }
        }
    }
}
