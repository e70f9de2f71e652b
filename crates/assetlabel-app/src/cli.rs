// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and how they layer over the configuration file.

use std::path::PathBuf;

use assetlabel_core::AppConfig;
use assetlabel_core::error::Result;
use clap::Parser;

/// Print asset labels for every device in a NetBox inventory.
#[derive(Debug, Parser)]
#[command(name = "assetlabel", version)]
pub struct Cli {
    /// Inventory base URL [default: https://icit-nsot.epfl.ch]
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// NetBox API token
    #[arg(long, env = "NETBOX_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// JSON configuration file; flags given here take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory the PNG labels are written to [default: etiquettes]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Printer name [default: Brother QL-720NW USB]
    #[arg(long, value_name = "NAME")]
    pub printer: Option<String>,

    /// Render the labels but do not print them
    #[arg(long)]
    pub no_print: bool,
}

impl Cli {
    /// Load the configuration file (or defaults), apply the flags, validate.
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(url) = &self.url {
            config.inventory.base_url = url.clone();
        }
        if let Some(token) = &self.token {
            config.inventory.token = token.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(printer) = &self.printer {
            config.printer.name = printer.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
