// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// assetlabel: NetBox devices in, printed asset labels out.
//
// Entry point. Initialises logging, resolves the configuration, then runs
// the fetch / render / print pipeline once.

mod cli;
mod output;
mod pipeline;

use std::process::ExitCode;

use assetlabel_core::error::Result;
use assetlabel_inventory::InventoryClient;
use assetlabel_print::{CommandBackend, PrintDispatcher};
use assetlabel_render::LabelRenderer;
use clap::Parser;

use cli::Cli;
use pipeline::{Pipeline, RunSummary};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "assetlabel starting");

    match run(&cli) {
        Ok(summary) => {
            if let Some(report) = summary.print.as_ref().filter(|r| !r.is_complete()) {
                tracing::warn!(
                    failed = report.failed.len(),
                    "some labels were not printed, see the errors above"
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "cannot run");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RunSummary> {
    let config = cli.load_config()?;
    let output_dir = output::prepare_output_dir(&config.output_dir)?;

    let source = InventoryClient::new(&config.inventory)?;
    let renderer = LabelRenderer::new(config.label, output_dir);
    let dispatcher = (!cli.no_print).then(|| {
        PrintDispatcher::new(CommandBackend::new(config.printer.utility), config.printer.name)
    });

    Ok(Pipeline::new(source, renderer, dispatcher).run())
}
