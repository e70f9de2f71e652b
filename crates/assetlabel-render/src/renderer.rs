// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Composes one device's label and writes it to disk.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use assetlabel_core::error::Result;
use assetlabel_core::{Device, DeviceId, LabelConfig};
use tracing::{info, instrument, warn};

use crate::canvas::LabelCanvas;
use crate::content::LabelContent;
use crate::font::LabelFont;
use crate::layout::LabelLayout;
use crate::qr::render_qr;

/// A label written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLabel {
    pub device_id: DeviceId,
    pub title: String,
    /// Absolute path of the PNG.
    pub path: PathBuf,
}

/// Renders labels into an output directory.
///
/// The renderer remembers which file names it has handed out so that two
/// devices with the same title in one run do not overwrite each other.
pub struct LabelRenderer {
    config: LabelConfig,
    layout: LabelLayout,
    title_font: LabelFont,
    caption_font: LabelFont,
    output_dir: PathBuf,
    used_stems: HashSet<String>,
}

impl LabelRenderer {
    /// Load the configured fonts (falling back to the bitmap face) and
    /// prepare to write into `output_dir`, which must already exist.
    pub fn new(config: LabelConfig, output_dir: impl Into<PathBuf>) -> Self {
        let title_font = LabelFont::load(&config.title_font, &config.font_dirs);
        let caption_font = LabelFont::load(&config.caption_font, &config.font_dirs);
        Self::with_fonts(config, output_dir, title_font, caption_font)
    }

    pub fn with_fonts(
        config: LabelConfig,
        output_dir: impl Into<PathBuf>,
        title_font: LabelFont,
        caption_font: LabelFont,
    ) -> Self {
        Self {
            layout: LabelLayout::compute(&config),
            config,
            title_font,
            caption_font,
            output_dir: output_dir.into(),
            used_stems: HashSet::new(),
        }
    }

    pub fn layout(&self) -> &LabelLayout {
        &self.layout
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Draw the label for `content` without touching the filesystem.
    pub fn compose(&self, content: &LabelContent) -> Result<LabelCanvas> {
        let layout = &self.layout;
        let mut canvas = LabelCanvas::blank(layout.canvas_width, layout.canvas_height, self.config.dpi);

        canvas.paste(
            render_qr(&content.code_payload, layout.qr_size)?,
            layout.left_qr.x,
            layout.left_qr.y,
        );
        canvas.paste(
            render_qr(&content.url_payload, layout.qr_size)?,
            layout.right_qr.x,
            layout.right_qr.y,
        );

        let (_, gap_width) = layout.title_gap();
        let title = self
            .title_font
            .fit(&content.title, gap_width, self.config.min_title_px);
        if title.text != content.title || title.size_px < self.title_font.size_px() {
            warn!(
                device_id = %content.device_id,
                title = %content.title,
                drawn = %title.text,
                size_px = title.size_px,
                "title too wide for the label, reduced"
            );
        }
        let origin = layout.title_origin(title.width, title.height);
        canvas.draw_text(&self.title_font, origin, &title.text, title.size_px);

        let caption_px = self.caption_font.size_px();
        for (anchor, caption) in [
            (&layout.left_qr, &content.code_caption),
            (&layout.right_qr, &content.url_caption),
        ] {
            let (width, _) = self.caption_font.measure(caption, caption_px);
            let origin = layout.caption_origin(anchor, width);
            canvas.draw_text(&self.caption_font, origin, caption, caption_px);
        }

        Ok(canvas)
    }

    /// Render `device` and save it as `<title>.png` in the output directory.
    #[instrument(skip_all, fields(device_id = %device.id))]
    pub fn render(&mut self, device: &Device) -> Result<RenderedLabel> {
        let content = LabelContent::for_device(device, &self.config);
        let canvas = self.compose(&content)?;

        let stem = self.claim_stem(&content);
        let path = self.output_dir.join(format!("{stem}.png"));
        canvas.save(&path)?;
        let path = std::path::absolute(&path)?;
        info!(path = %path.display(), "label generated");

        Ok(RenderedLabel {
            device_id: device.id,
            title: content.title,
            path,
        })
    }

    /// File stem for `content`, disambiguated when an earlier label in this
    /// run already used it: `<stem>-<id>`, then `<stem>-<id>-2`, `-3`, ...
    fn claim_stem(&mut self, content: &LabelContent) -> String {
        let stem = file_stem(&content.title, content.device_id);
        if self.used_stems.insert(stem.to_lowercase()) {
            return stem;
        }
        let base = format!("{stem}-{}", content.device_id);
        let mut unique = base.clone();
        let mut suffix = 1u32;
        while !self.used_stems.insert(unique.to_lowercase()) {
            suffix += 1;
            unique = format!("{base}-{suffix}");
        }
        warn!(
            device_id = %content.device_id,
            taken = %stem,
            using = %unique,
            "label file name already used in this run"
        );
        unique
    }
}

/// Make `title` safe to use as a file name.
pub fn file_stem(title: &str, id: DeviceId) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        format!("unnamed-{id}")
    } else {
        cleaned.to_string()
    }
}
