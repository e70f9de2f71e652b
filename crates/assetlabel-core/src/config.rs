// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.
//
// Every field has a default matching the Brother QL label stock the tool was
// built for; a JSON file may override any subset of them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{LabelError, Result};

/// Complete run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub inventory: InventoryConfig,
    pub label: LabelConfig,
    pub printer: PrinterConfig,
    /// Directory the rendered PNG files are written to.
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            inventory: InventoryConfig::default(),
            label: LabelConfig::default(),
            printer: PrinterConfig::default(),
            output_dir: PathBuf::from("etiquettes"),
        }
    }
}

impl AppConfig {
    /// Load a configuration file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            LabelError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        let config: Self = serde_json::from_str(&raw)?;
        info!(path = %path.display(), "configuration loaded");
        debug!(label = ?config.label, "label geometry");
        Ok(config)
    }

    /// Reject configurations that cannot produce a usable run.
    pub fn validate(&self) -> Result<()> {
        if self.inventory.token.trim().is_empty() {
            return Err(LabelError::Config("an API token is required".into()));
        }
        if self.inventory.base_url.trim().is_empty() {
            return Err(LabelError::Config("the inventory base URL is empty".into()));
        }
        if self.printer.name.trim().is_empty() {
            return Err(LabelError::Config("the printer name is empty".into()));
        }
        self.label.validate()
    }
}

/// Inventory API connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Base URL of the NetBox instance, without the `/api` suffix.
    pub base_url: String,
    /// API token, sent as `Authorization: Token <token>`.
    pub token: String,
    /// Optional `limit` for the first page; later pages follow `next` verbatim.
    pub page_size: Option<u32>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://icit-nsot.epfl.ch".into(),
            token: String::new(),
            page_size: None,
        }
    }
}

/// A TrueType face and the pixel size it is drawn at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// File name (searched in `LabelConfig::font_dirs`) or absolute path.
    pub file: PathBuf,
    pub size_px: f32,
}

impl FontSpec {
    pub fn new(file: impl Into<PathBuf>, size_px: f32) -> Self {
        Self {
            file: file.into(),
            size_px,
        }
    }

    /// Find the font file on disk.
    ///
    /// The path is tried as given first, then joined onto each search
    /// directory in order. Returns `None` when the face is unavailable.
    pub fn locate(&self, search_dirs: &[PathBuf]) -> Option<PathBuf> {
        if self.file.is_file() {
            return Some(self.file.clone());
        }
        if self.file.is_absolute() {
            return None;
        }
        search_dirs
            .iter()
            .map(|dir| dir.join(&self.file))
            .find(|candidate| candidate.is_file())
    }
}

/// Physical label geometry and content templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub dpi: u32,
    pub width_mm: f64,
    pub height_mm: f64,
    pub top_margin_px: u32,
    pub bottom_margin_px: u32,
    /// Share of the vertical space between the margins taken by a QR code.
    pub qr_fraction: f64,
    /// Distance of each QR code from its side edge.
    pub edge_margin_mm: f64,
    /// Gap between the bottom of the QR codes and the captions.
    pub caption_offset_px: u32,
    /// QR payload 1 when a device has no asset tag: `<prefix><id>`.
    pub fallback_prefix: String,
    /// QR payload 2 is `<device_url_base>/dcim/devices/<id>`.
    pub device_url_base: String,
    /// The title is the device name up to the first occurrence of this.
    pub title_separator: char,
    /// Caption printed under the device-URL QR code.
    pub url_caption: String,
    pub title_font: FontSpec,
    pub caption_font: FontSpec,
    /// Smallest size the title is shrunk to before it gets truncated.
    pub min_title_px: f32,
    pub font_dirs: Vec<PathBuf>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            dpi: 300,
            width_mm: 90.0,
            height_mm: 38.0,
            top_margin_px: 18,
            bottom_margin_px: 18,
            qr_fraction: 0.55,
            edge_margin_mm: 3.0,
            caption_offset_px: 5,
            fallback_prefix: "None-".into(),
            device_url_base: "https://icit-nsot.epfl.ch".into(),
            title_separator: '.',
            url_caption: "DCIM".into(),
            title_font: FontSpec::new("arialbd.ttf", 54.0),
            caption_font: FontSpec::new("arial.ttf", 32.0),
            min_title_px: 12.0,
            font_dirs: default_font_dirs(),
        }
    }
}

impl LabelConfig {
    fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(LabelError::Config("dpi must be positive".into()));
        }
        if self.width_mm <= 0.0 || self.height_mm <= 0.0 {
            return Err(LabelError::Config("label dimensions must be positive".into()));
        }
        let fraction_ok = self.qr_fraction > 0.0 && self.qr_fraction <= 1.0;
        if !fraction_ok {
            return Err(LabelError::Config(format!(
                "qr_fraction must be in (0, 1], got {}",
                self.qr_fraction
            )));
        }
        Ok(())
    }
}

/// Conventional system font directories for the current platform.
pub fn default_font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if cfg!(windows) {
        let windir = std::env::var("WINDIR").unwrap_or_else(|_| r"C:\Windows".into());
        dirs.push(PathBuf::from(windir).join("Fonts"));
    } else if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.push(PathBuf::from("/System/Library/Fonts/Supplemental"));
    } else {
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(PathBuf::from(home).join(".local/share/fonts"));
        }
        dirs.push(PathBuf::from("/usr/share/fonts/truetype/msttcorefonts"));
        dirs.push(PathBuf::from("/usr/share/fonts/TTF"));
        dirs.push(PathBuf::from("/usr/share/fonts/truetype"));
    }
    dirs
}

/// Printer target and the utility used to reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    /// Queue / driver name as known to the operating system.
    pub name: String,
    pub utility: PrintUtility,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            name: "Brother QL-720NW USB".into(),
            utility: PrintUtility::default(),
        }
    }
}

/// External program that puts a PNG on paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PrintUtility {
    /// Brother P-touch Editor, driven through PowerShell `Start-Process`.
    PtEditor { executable: String },
    /// CUPS `lp -d <printer> <file>`.
    Lp,
    /// Arbitrary program; `{file}` and `{printer}` are substituted in `args`.
    Custom { program: String, args: Vec<String> },
}

impl Default for PrintUtility {
    fn default() -> Self {
        if cfg!(windows) {
            Self::PtEditor {
                executable: "ptedit54.exe".into(),
            }
        } else {
            Self::Lp
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("assetlabel.json");
        std::fs::write(
            &path,
            r#"{ "printer": { "name": "QL-820" }, "label": { "dpi": 600 } }"#,
        )
        .expect("write config");

        let config = AppConfig::load(&path).expect("load");
        assert_eq!(config.printer.name, "QL-820");
        assert_eq!(config.printer.utility, PrintUtility::default());
        assert_eq!(config.label.dpi, 600);
        assert_eq!(config.label.width_mm, 90.0);
        assert_eq!(config.output_dir, PathBuf::from("etiquettes"));
    }

    #[test]
    fn custom_utility_parses() {
        let config: PrinterConfig = serde_json::from_str(
            r#"{ "name": "lbl", "utility": { "kind": "custom", "program": "brother_ql", "args": ["print", "{file}"] } }"#,
        )
        .expect("parse");
        assert_eq!(
            config.utility,
            PrintUtility::Custom {
                program: "brother_ql".into(),
                args: vec!["print".into(), "{file}".into()],
            }
        );
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = AppConfig::load("/nonexistent/assetlabel.json").unwrap_err();
        assert!(matches!(err, LabelError::Config(_)));
    }

    #[test]
    fn validate_requires_token() {
        let mut config = AppConfig::default();
        assert!(matches!(config.validate(), Err(LabelError::Config(_))));
        config.inventory.token = "secret".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_geometry() {
        let mut config = AppConfig::default();
        config.inventory.token = "secret".into();
        config.label.qr_fraction = 1.5;
        assert!(config.validate().is_err());
        config.label.qr_fraction = 0.55;
        config.label.dpi = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn qr_fraction_must_be_in_half_open_unit_interval() {
        let mut config = AppConfig::default();
        config.inventory.token = "secret".into();
        for (fraction, ok) in [(0.0, false), (-0.1, false), (f64::NAN, false), (0.01, true), (1.0, true), (1.01, false)] {
            config.label.qr_fraction = fraction;
            assert_eq!(config.validate().is_ok(), ok, "qr_fraction {fraction}");
        }
    }

    #[test]
    fn locate_prefers_direct_path_then_search_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let font = dir.path().join("face.ttf");
        std::fs::write(&font, b"not really a font").expect("write");

        let direct = FontSpec::new(&font, 10.0);
        assert_eq!(direct.locate(&[]), Some(font.clone()));

        let by_name = FontSpec::new("face.ttf", 10.0);
        assert_eq!(by_name.locate(&[dir.path().to_path_buf()]), Some(font));
        assert_eq!(by_name.locate(&[]), None);
    }
}
