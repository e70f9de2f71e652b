// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output directory resolution.

use std::path::{Path, PathBuf};

use assetlabel_core::error::{LabelError, Result};
use tracing::info;

/// Create the label directory if needed and return its absolute path.
///
/// Relative paths resolve against the current working directory. Existing
/// files inside are left alone; labels with the same name are overwritten
/// when they are rendered.
pub fn prepare_output_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|err| {
        LabelError::Config(format!(
            "cannot create output directory {}: {}",
            dir.display(),
            err
        ))
    })?;
    let dir = std::path::absolute(dir)?;
    info!(path = %dir.display(), "labels will be written here");
    Ok(dir)
}
