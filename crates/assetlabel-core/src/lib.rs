// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// assetlabel: Core types, configuration and error definitions shared across
// all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, FontSpec, InventoryConfig, LabelConfig, PrintUtility, PrinterConfig};
pub use error::LabelError;
pub use types::*;
