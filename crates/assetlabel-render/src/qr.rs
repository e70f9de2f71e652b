// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QR code rasterisation.

use assetlabel_core::error::{LabelError, Result};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use qrcode::{Color, QrCode};
use tracing::debug;

/// Light modules kept around the symbol.
const BORDER_MODULES: usize = 1;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Encode `payload` (error correction level M) and scale it to a
/// `size` x `size` image with nearest-neighbour sampling.
pub fn render_qr(payload: &str, size: u32) -> Result<GrayImage> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| LabelError::Qr(format!("cannot encode {payload:?}: {e}")))?;

    let modules = code.width();
    let side = (modules + 2 * BORDER_MODULES) as u32;
    let mut grid = GrayImage::from_pixel(side, side, LIGHT);
    for (index, color) in code.to_colors().into_iter().enumerate() {
        if color == Color::Dark {
            let x = (index % modules + BORDER_MODULES) as u32;
            let y = (index / modules + BORDER_MODULES) as u32;
            grid.put_pixel(x, y, DARK);
        }
    }
    debug!(modules, size, "QR code encoded");

    Ok(imageops::resize(&grid, size, size, FilterType::Nearest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_to_requested_size() {
        let img = render_qr("INV-0042", 226).expect("encode");
        assert_eq!(img.dimensions(), (226, 226));
    }

    #[test]
    fn border_is_light_and_finder_pattern_is_dark() {
        let img = render_qr("None-17", 230).expect("encode");
        // Version 1 symbol + border = 23 modules of 10 px.
        assert_eq!(*img.get_pixel(0, 0), LIGHT);
        assert_eq!(*img.get_pixel(229, 229), LIGHT);
        // Centre of the top-left finder pattern (module 3,3 + border).
        assert_eq!(*img.get_pixel(45, 45), DARK);
    }

    #[test]
    fn long_urls_still_fit() {
        let url = format!("https://netbox.example.org/dcim/devices/{}", u64::MAX);
        let img = render_qr(&url, 226).expect("encode");
        assert_eq!(img.dimensions(), (226, 226));
        assert!(img.pixels().any(|p| *p == DARK));
    }

    #[test]
    fn oversized_payload_is_an_error() {
        let payload = "x".repeat(8000);
        assert!(matches!(render_qr(&payload, 226), Err(LabelError::Qr(_))));
    }
}
