// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// assetlabel-print: Sends rendered label files to a printer by running the
// platform's label utility once per file. One failed file never stops the
// rest of the batch.

pub mod dispatcher;
pub mod utility;

pub use dispatcher::{CommandBackend, PrintBackend, PrintDispatcher, PrintFailure, PrintReport};
pub use utility::command_for;
