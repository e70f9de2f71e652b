// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// What goes on a label, independent of where it is drawn.

use assetlabel_core::{Device, DeviceId, LabelConfig};

/// Strings placed on one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelContent {
    pub device_id: DeviceId,
    /// Left QR code: the asset tag, or `<fallback_prefix><id>`.
    pub code_payload: String,
    /// Right QR code: link to the device page in the inventory UI.
    pub url_payload: String,
    /// Device name up to the first separator.
    pub title: String,
    /// Printed under the left QR code; always equal to `code_payload`.
    pub code_caption: String,
    /// Printed under the right QR code.
    pub url_caption: String,
}

impl LabelContent {
    pub fn for_device(device: &Device, config: &LabelConfig) -> Self {
        let code_payload = if device.has_asset_tag() {
            device.asset_tag.clone()
        } else {
            format!("{}{}", config.fallback_prefix, device.id)
        };
        let url_payload = format!(
            "{}/dcim/devices/{}",
            config.device_url_base.trim_end_matches('/'),
            device.id
        );

        Self {
            device_id: device.id,
            code_caption: code_payload.clone(),
            code_payload,
            url_payload,
            title: truncate_title(&device.name, config.title_separator).to_string(),
            url_caption: config.url_caption.clone(),
        }
    }
}

/// `name` up to (not including) the first `separator`.
pub fn truncate_title(name: &str, separator: char) -> &str {
    name.split(separator).next().unwrap_or(name)
}
