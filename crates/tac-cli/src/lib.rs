//! Local harness for the Tarmac reversing guest.
//!
//! `tac` runs a single request through the guest's dispatcher without a
//! WebAssembly runtime. The host logger capability is served by `tracing`,
//! the response envelope is written to stdout, and logs go to stderr.
//!
//! ```text
//! $ tac http:POST --payload hello
//! {"payload":"b2xsZWg=","status":{"code":200,"status":"Success"}}
//! ```

use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::ExitCode;

use clap::Parser;
use tac_envelope::ServerRequest;
use tac_guest::{Dispatcher, tac_routes};

mod cli;
pub mod config;
mod errors;
pub mod host;
pub mod telemetry;


use cli::Cli;
pub use config::{Config, LogFormat};
pub use errors::CliError;
pub use host::TracingHost;

/// Exit status used when arguments cannot be parsed.
const USAGE_EXIT: u8 = 2;

/// Parses `args`, runs the request, and reports the outcome.
///
/// Returns success whenever a response envelope was written, including
/// envelopes that carry a `500` or `503` status.
pub fn run<I, R, W, E>(args: I, stdin: &mut R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let rendered = error.render().to_string();
            if error.use_stderr() {
                stderr.write_all(rendered.as_bytes()).ok();
                return ExitCode::from(USAGE_EXIT);
            }
            stdout.write_all(rendered.as_bytes()).ok();
            return ExitCode::SUCCESS;
        }
    };

    match execute(&cli, stdin, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %error, verb = %cli.verb, "guest call failed");
            writeln!(stderr, "tac: {error}").ok();
            ExitCode::FAILURE
        }
    }
}

fn execute<R: Read, W: Write>(cli: &Cli, stdin: &mut R, stdout: &mut W) -> Result<(), CliError> {
    telemetry::initialise(&cli.config())?;

    let input = read_request(cli.payload.as_deref(), stdin)?;
    let dispatcher = Dispatcher::new(tac_routes()?, TracingHost);
    let output = dispatcher.dispatch(&cli.verb, &input)?;

    stdout
        .write_all(&output)
        .and_then(|()| stdout.write_all(b"\n"))
        .and_then(|()| stdout.flush())
        .map_err(CliError::WriteResponse)
}

/// Builds the request bytes from `--payload` or reads them from `stdin`.
fn read_request<R: Read>(payload: Option<&str>, stdin: &mut R) -> Result<Vec<u8>, CliError> {
    if let Some(text) = payload {
        return serde_json::to_vec(&ServerRequest::from_bytes(text.as_bytes()))
            .map_err(CliError::SerializeRequest);
    }
    let mut input = Vec::new();
    stdin
        .read_to_end(&mut input)
        .map_err(CliError::ReadRequest)?;
    Ok(input)
}
