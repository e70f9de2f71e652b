// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// assetlabel-inventory: Device records from the NetBox REST API.
//
// Walks the paginated `dcim/devices` listing, drops virtual machines and
// converts the wire records into `assetlabel_core::Device`.

pub mod client;
pub mod wire;

pub use client::{DeviceSource, InventoryClient, paginate};
pub use wire::{DevicePage, DeviceType, RawDevice};
