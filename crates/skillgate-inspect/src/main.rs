//! CLI entrypoint for the skill request inspector.
//!
//! The binary delegates to [`skillgate_inspect::run`], which loads
//! configuration, reads one request envelope from stdin, dispatches it and
//! prints a JSON report.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdin: StdinLock<'_> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    skillgate_inspect::run(std::env::args_os(), &mut stdin, &mut stdout, &mut stderr)
}
