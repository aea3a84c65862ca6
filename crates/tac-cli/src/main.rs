//! Binary entrypoint for the `tac` local harness.
//!
//! Delegates to [`tac_cli::run`] with the process streams.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    tac_cli::run(std::env::args_os(), &mut stdin, &mut stdout, &mut stderr)
}
