// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON shapes of the NetBox device listing. Only the fields the labels need
// are modelled; everything else in the payload is ignored.

use assetlabel_core::Device;
use serde::Deserialize;

/// One page of `GET /api/dcim/devices/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevicePage {
    #[serde(default)]
    pub results: Vec<RawDevice>,
    /// Absolute URL of the following page, `null` on the last one.
    #[serde(default)]
    pub next: Option<String>,
}

/// A device entry as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDevice {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub asset_tag: Option<String>,
    #[serde(default)]
    pub device_type: Option<DeviceType>,
}

/// Nested `device_type` summary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceType {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl DeviceType {
    /// The type name: `model`, or `slug` when the model is missing or empty.
    pub fn type_name(&self) -> &str {
        match self.model.as_deref() {
            Some(model) if !model.is_empty() => model,
            _ => self.slug.as_deref().unwrap_or(""),
        }
    }

    pub fn is_virtual_machine(&self) -> bool {
        self.type_name().eq_ignore_ascii_case("vm")
    }
}

impl RawDevice {
    pub fn is_virtual_machine(&self) -> bool {
        self.device_type
            .as_ref()
            .is_some_and(DeviceType::is_virtual_machine)
    }

    /// Convert into the domain record. Unnamed devices are called
    /// `unnamed-<id>`; a null asset tag becomes empty.
    pub fn into_device(self) -> Device {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => format!("unnamed-{}", self.id),
        };
        Device::new(self.id, name, self.asset_tag.unwrap_or_default())
    }
}
