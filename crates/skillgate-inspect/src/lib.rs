//! Command-line inspector for skill request envelopes.
//!
//! Reads one request envelope from stdin, dispatches it through the
//! [`skillgate::Dispatcher`] with an [`InspectHandler`] and prints an
//! [`InspectionReport`] to stdout. Validation uses the layered
//! [`skillgate_config::Config`], so `--application-id`,
//! `--timestamp-tolerance-secs` and the matching `SKILLGATE_*` variables
//! apply.

mod handler;
mod report;
pub mod telemetry;

use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::sync::Arc;

use skillgate::{DispatchError, DispatchSettings, Dispatcher, parse_envelope};
use ortho_config::OrthoConfig;
use skillgate_config::Config;
use thiserror::Error;
use tracing::info;

pub use handler::{InspectHandler, TURN_ATTRIBUTE};
pub use report::InspectionReport;

use crate::telemetry::TelemetryError;

const INSPECT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::inspect");

/// Errors that stop an inspection run.
#[derive(Debug, Error)]
pub enum InspectError {
    /// Configuration could not be loaded.
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    /// Telemetry could not be initialised.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    /// Stdin could not be read.
    #[error("failed to read request envelope: {0}")]
    ReadInput(#[source] io::Error),
    /// The envelope was rejected or a callback failed.
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),
    /// The report could not be encoded.
    #[error("failed to serialise report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// The report could not be written.
    #[error("failed to write report: {0}")]
    WriteReport(#[source] io::Error),
}

/// Runs the inspector with the given arguments and IO handles.
#[must_use]
pub fn run<I, R, W, E>(args: I, stdin: &mut R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
{
    match try_run(args, stdin, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn try_run<I, R, W>(args: I, stdin: &mut R, stdout: &mut W) -> Result<(), InspectError>
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
{
    let config = Config::load_from_iter(args).map_err(InspectError::LoadConfiguration)?;
    telemetry::initialise(&config)?;

    let mut input = Vec::new();
    stdin
        .read_to_end(&mut input)
        .map_err(InspectError::ReadInput)?;

    let report = inspect(&config, &input)?;

    serde_json::to_writer_pretty(&mut *stdout, &report).map_err(InspectError::SerialiseReport)?;
    writeln!(stdout).map_err(InspectError::WriteReport)?;
    Ok(())
}

/// Dispatches one raw envelope and summarises the outcome.
///
/// # Errors
///
/// Returns [`InspectError::Dispatch`] when the envelope is missing,
/// malformed, fails validation or a callback fails.
pub fn inspect(config: &Config, input: &[u8]) -> Result<InspectionReport, InspectError> {
    let mut envelope = parse_envelope(input)?;
    let dispatcher = Dispatcher::new(DispatchSettings::from(config), InspectHandler::new());
    let dispatch = dispatcher.process(&mut envelope)?;
    let callbacks = dispatcher.handler().invoked();
    info!(
        target: INSPECT_TARGET,
        request_type = envelope.request_type().unwrap_or_default(),
        callbacks = callbacks.len(),
        "request inspected"
    );
    Ok(InspectionReport::new(&envelope, dispatch, &callbacks))
}

#[cfg(test)]
mod tests;
