// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command lines for the supported label-printing utilities.

use std::path::Path;
use std::process::Command;

use assetlabel_core::PrintUtility;

/// Build the command that prints `file` on `printer` with `utility`.
pub fn command_for(utility: &PrintUtility, file: &Path, printer: &str) -> Command {
    match utility {
        PrintUtility::PtEditor { executable } => {
            // P-touch Editor returns before the job is spooled unless it is
            // started through Start-Process -Wait.
            let script = format!(
                "Start-Process {} -ArgumentList '/pt \"{}\" \"{}\"' -Wait",
                executable,
                powershell_quote(&file.display().to_string()),
                powershell_quote(printer),
            );
            let mut command = Command::new("powershell");
            command.arg("-Command").arg(script);
            command
        }
        PrintUtility::Lp => {
            let mut command = Command::new("lp");
            command.arg("-d").arg(printer).arg(file);
            command
        }
        PrintUtility::Custom { program, args } => {
            let file = file.display().to_string();
            let mut command = Command::new(program);
            command.args(
                args.iter()
                    .map(|arg| arg.replace("{file}", &file).replace("{printer}", printer)),
            );
            command
        }
    }
}

/// Escape for use inside a single-quoted PowerShell string.
fn powershell_quote(value: &str) -> String {
    value.replace('\'', "''")
}
