// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Label geometry.
//
// Everything here is integer pixel arithmetic derived from `LabelConfig`.
// Divisions by two round towards negative infinity, so text larger than its
// box is offset by floor division rather than truncation.

use assetlabel_core::LabelConfig;

const MM_PER_INCH: f64 = 25.4;

/// Convert millimetres to whole pixels at `dpi`, truncating.
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    ((mm / MM_PER_INCH) * f64::from(dpi)) as u32
}

/// Axis-aligned pixel rectangle. `x`/`y` may be negative for off-canvas text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First column to the right of the rectangle.
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// First row below the rectangle.
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Resolved positions of every fixed element on the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Side length of both (square) QR codes.
    pub qr_size: u32,
    /// QR code carrying the asset tag, near the left edge.
    pub left_qr: Rect,
    /// QR code carrying the device URL, near the right edge.
    pub right_qr: Rect,
    /// Top row of both captions.
    pub caption_y: i32,
}

impl LabelLayout {
    pub fn compute(config: &LabelConfig) -> Self {
        let canvas_width = mm_to_px(config.width_mm, config.dpi);
        let canvas_height = mm_to_px(config.height_mm, config.dpi);

        let usable = canvas_height
            .saturating_sub(config.top_margin_px)
            .saturating_sub(config.bottom_margin_px);
        let qr_size = (f64::from(usable) * config.qr_fraction) as u32;

        let edge = mm_to_px(config.edge_margin_mm, config.dpi) as i32;
        let qr_y = (canvas_height as i32 - qr_size as i32).div_euclid(2);
        let left_qr = Rect::new(edge, qr_y, qr_size, qr_size);
        let right_qr = Rect::new(
            canvas_width as i32 - edge - qr_size as i32,
            qr_y,
            qr_size,
            qr_size,
        );

        Self {
            canvas_width,
            canvas_height,
            qr_size,
            left_qr,
            right_qr,
            caption_y: left_qr.bottom() + config.caption_offset_px as i32,
        }
    }

    /// Horizontal band between the two QR codes: `(left, width)`.
    pub fn title_gap(&self) -> (i32, u32) {
        let left = self.left_qr.right();
        let width = (self.right_qr.x - left).max(0) as u32;
        (left, width)
    }

    /// Top-left corner for a title of the given size.
    ///
    /// Centred in the gap between the QR codes and in the QR band vertically.
    /// A title wider than the gap is pinned to the gap's left edge.
    pub fn title_origin(&self, text_width: u32, text_height: u32) -> (i32, i32) {
        let (gap_left, gap_width) = self.title_gap();
        let slack = (gap_width as i32 - text_width as i32).max(0);
        let x = gap_left + slack / 2;
        let y = self.left_qr.y + (self.qr_size as i32 - text_height as i32).div_euclid(2);
        (x, y)
    }

    pub fn title_rect(&self, text_width: u32, text_height: u32) -> Rect {
        let (x, y) = self.title_origin(text_width, text_height);
        Rect::new(x, y, text_width, text_height)
    }

    /// Top-left corner for a caption centred under `anchor`, kept on canvas.
    pub fn caption_origin(&self, anchor: &Rect, text_width: u32) -> (i32, i32) {
        let x = anchor.x + (anchor.width as i32 - text_width as i32).div_euclid(2);
        let max_x = (self.canvas_width as i32 - text_width as i32).max(0);
        (x.clamp(0, max_x), self.caption_y)
    }
}
