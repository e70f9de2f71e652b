// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Best-effort print dispatch.
//
// Files are printed strictly one after another. Each outcome is folded into a
// `PrintReport`; a failure is logged and recorded, then the next file is
// attempted.

use std::path::{Path, PathBuf};

use assetlabel_core::PrintUtility;
use assetlabel_core::error::{LabelError, Result};
use tracing::{debug, error, info, instrument};

use crate::utility::command_for;

/// Something that can put one file on paper.
pub trait PrintBackend {
    fn print_file(&self, file: &Path, printer: &str) -> Result<()>;
}

impl<B: PrintBackend + ?Sized> PrintBackend for &B {
    fn print_file(&self, file: &Path, printer: &str) -> Result<()> {
        (**self).print_file(file, printer)
    }
}

/// Runs an external utility and waits for it to exit.
#[derive(Debug, Clone)]
pub struct CommandBackend {
    utility: PrintUtility,
}

impl CommandBackend {
    pub fn new(utility: PrintUtility) -> Self {
        Self { utility }
    }
}

impl PrintBackend for CommandBackend {
    #[instrument(skip(self), fields(file = %file.display()))]
    fn print_file(&self, file: &Path, printer: &str) -> Result<()> {
        let mut command = command_for(&self.utility, file, printer);
        debug!(program = ?command.get_program(), "starting print utility");

        let status = command.status().map_err(|e| {
            LabelError::Print(format!(
                "cannot start {}: {}",
                command.get_program().to_string_lossy(),
                e
            ))
        })?;
        if !status.success() {
            return Err(LabelError::PrintExit {
                file: file.display().to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }
}

/// A file that could not be printed.
#[derive(Debug)]
pub struct PrintFailure {
    pub file: PathBuf,
    pub error: LabelError,
}

/// Outcome of one dispatch run, in submission order.
#[derive(Debug, Default)]
pub struct PrintReport {
    pub printed: Vec<PathBuf>,
    pub failed: Vec<PrintFailure>,
}

impl PrintReport {
    pub fn attempted(&self) -> usize {
        self.printed.len() + self.failed.len()
    }

    /// True when every attempted file printed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(mut self, file: &Path, outcome: Result<()>) -> Self {
        match outcome {
            Ok(()) => {
                info!(file = %file.display(), "sent to printer");
                self.printed.push(file.to_path_buf());
            }
            Err(err) => {
                error!(file = %file.display(), error = %err, "could not print");
                self.failed.push(PrintFailure {
                    file: file.to_path_buf(),
                    error: err,
                });
            }
        }
        self
    }
}

/// Sends every file to one named printer through a backend.
pub struct PrintDispatcher<B> {
    backend: B,
    printer: String,
}

impl<B: PrintBackend> PrintDispatcher<B> {
    pub fn new(backend: B, printer: impl Into<String>) -> Self {
        Self {
            backend,
            printer: printer.into(),
        }
    }

    pub fn printer(&self) -> &str {
        &self.printer
    }

    /// Print each file once, in order, never stopping early.
    pub fn dispatch<P: AsRef<Path>>(&self, files: &[P]) -> PrintReport {
        let report = files.iter().fold(PrintReport::default(), |report, file| {
            let file = file.as_ref();
            report.record(file, self.backend.print_file(file, &self.printer))
        });
        info!(
            printer = %self.printer,
            printed = report.printed.len(),
            failed = report.failed.len(),
            "print dispatch finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every call; fails for files whose name contains "jam".
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(PathBuf, String)>>,
    }

    impl PrintBackend for Recorder {
        fn print_file(&self, file: &Path, printer: &str) -> Result<()> {
            self.calls
                .borrow_mut()
                .push((file.to_path_buf(), printer.to_string()));
            if file.to_string_lossy().contains("jam") {
                return Err(LabelError::Print("paper jam".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn every_file_is_attempted_despite_failures() {
        let recorder = Recorder::default();
        let dispatcher = PrintDispatcher::new(&recorder, "QL-720NW");
        let files = ["a.png", "jam.png", "c.png"];

        let report = dispatcher.dispatch(&files);

        assert_eq!(report.attempted(), 3);
        assert_eq!(report.printed, vec![PathBuf::from("a.png"), PathBuf::from("c.png")]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].file, PathBuf::from("jam.png"));
        assert!(!report.is_complete());

        let calls = recorder.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|(_, printer)| printer == "QL-720NW"));
    }

    #[test]
    fn empty_batch_is_complete() {
        let dispatcher = PrintDispatcher::new(Recorder::default(), "QL");
        let report = dispatcher.dispatch::<PathBuf>(&[]);
        assert_eq!(report.attempted(), 0);
        assert!(report.is_complete());
    }

    #[cfg(unix)]
    #[test]
    fn command_backend_reports_exit_status() {
        let ok = CommandBackend::new(PrintUtility::Custom {
            program: "true".into(),
            args: vec!["{file}".into()],
        });
        assert!(ok.print_file(Path::new("x.png"), "QL").is_ok());

        let failing = CommandBackend::new(PrintUtility::Custom {
            program: "false".into(),
            args: vec![],
        });
        assert!(matches!(
            failing.print_file(Path::new("x.png"), "QL"),
            Err(LabelError::PrintExit { code: Some(1), .. })
        ));
    }

    #[test]
    fn missing_utility_is_a_print_error() {
        let backend = CommandBackend::new(PrintUtility::Custom {
            program: "assetlabel-no-such-print-utility".into(),
            args: vec![],
        });
        assert!(matches!(
            backend.print_file(Path::new("x.png"), "QL"),
            Err(LabelError::Print(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn command_backend_receives_substituted_arguments() {
        let dir = tempfile::tempdir().expect("tempdir");
        let marker = dir.path().join("printed.txt");
        let backend = CommandBackend::new(PrintUtility::Custom {
            program: "sh".into(),
            args: vec![
                "-c".into(),
                format!("echo \"$0 $1\" > {}", marker.display()),
                "{printer}".into(),
                "{file}".into(),
            ],
        });
        backend
            .print_file(Path::new("/labels/sw-01.png"), "QL-720NW")
            .expect("print");
        let written = std::fs::read_to_string(&marker).expect("marker");
        assert_eq!(written.trim(), "QL-720NW /labels/sw-01.png");
    }
}
