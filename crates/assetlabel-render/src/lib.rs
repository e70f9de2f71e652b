// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// assetlabel-render: Turns one device record into a printable label.
//
// The geometry (`layout`) is pure arithmetic over `LabelConfig` and can be
// checked without drawing anything; `renderer` composes the QR codes and
// text onto a `LabelCanvas` and writes it as a PNG carrying the DPI.

pub mod canvas;
pub mod content;
pub mod font;
pub mod layout;
pub mod qr;
pub mod renderer;

pub use canvas::LabelCanvas;
pub use content::LabelContent;
pub use font::{FittedText, LabelFont};
pub use layout::{LabelLayout, Rect, mm_to_px};
pub use renderer::{LabelRenderer, RenderedLabel};
