// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for assetlabel.

use thiserror::Error;

/// Top-level error type for all assetlabel operations.
#[derive(Debug, Error)]
pub enum LabelError {
    // -- Inventory errors --
    #[error("inventory request failed: {0}")]
    Inventory(String),

    #[error("inventory returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // -- Rendering errors --
    #[error("QR encoding failed: {0}")]
    Qr(String),

    #[error("image processing failed: {0}")]
    Image(String),

    // -- Print errors --
    #[error("print dispatch failed: {0}")]
    Print(String),

    #[error("print utility exited with {code:?} for {file}")]
    PrintExit { file: String, code: Option<i32> },

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LabelError>;
