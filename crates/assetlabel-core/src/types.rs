// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for assetlabel.

use serde::{Deserialize, Serialize};

/// Inventory identifier of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceId(pub u64);

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One inventoried device, as fetched from the inventory API.
///
/// Records are immutable once fetched and each one produces exactly one
/// label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    /// Display name, possibly fully qualified (`sw-core-01.example.org`).
    pub name: String,
    /// Human-assigned inventory tag. Empty when the device has none.
    pub asset_tag: String,
}

impl Device {
    pub fn new(id: u64, name: impl Into<String>, asset_tag: impl Into<String>) -> Self {
        Self {
            id: DeviceId(id),
            name: name.into(),
            asset_tag: asset_tag.into(),
        }
    }

    /// Whether an asset tag was assigned.
    pub fn has_asset_tag(&self) -> bool {
        !self.asset_tag.is_empty()
    }
}
