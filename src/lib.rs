//! extract_sessions - SecureCRT session export
//!
//! Reads a SecureCRT XML session-configuration export and writes a flat CSV
//! of connection endpoints (`name,address,port,protocol`).
//!
//! The conversion is three sequential steps: resolve and read the input
//! ([`source`], [`xml`]), walk the session tree ([`sessions`]), and write the
//! rows ([`output`]).

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod sessions;
pub mod source;
pub mod xml;

use std::io::BufRead;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::config::ExtractOptions;
use crate::error::{ExitCode, ExtractError};
use crate::output::CsvOutput;
use crate::sessions::{SessionRecord, SessionWalker, WalkSummary};
use crate::source::StreamTarget;

/// Run the converter for parsed command-line arguments.
///
/// Logging must already be initialised.
///
/// # Errors
///
/// Returns the first error encountered; use [`ExitCode::for_error`] to map
/// it to a process exit code.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let options = ExtractOptions::from_cli(&cli);
    log::debug!("Options: {:?}", options);

    export(&cli.input, &cli.output, &options)?;
    Ok(ExitCode::Success)
}

/// Parse an XML document from `reader` and collect its sessions.
///
/// # Errors
///
/// Returns [`ExtractError::XmlParse`] for malformed documents and whatever
/// the walker reports for the session tree.
pub fn extract_records<R: BufRead>(
    reader: R,
    source_name: &str,
    options: &ExtractOptions,
) -> Result<(Vec<SessionRecord>, WalkSummary), ExtractError> {
    let document = xml::parse_document(reader, source_name)?;
    SessionWalker::new(options).walk(&document, source_name)
}

/// Convert `input` to CSV at `destination`.
///
/// The destination is only opened once the whole input has been read and
/// walked, so a bad input never truncates an existing output file.
///
/// # Errors
///
/// Returns [`ExtractError`] for open, parse and field failures, or a CSV
/// write error wrapped with the destination name.
pub fn export(
    input: &StreamTarget,
    destination: &StreamTarget,
    options: &ExtractOptions,
) -> Result<WalkSummary> {
    let source_name = input.label("stdin");
    let destination_name = destination.label("stdout");

    let (records, summary) = {
        let reader = input.open_input()?;
        extract_records(reader, &source_name, options)?
    };

    let writer = output::open_destination(destination)?;
    CsvOutput::new(&records, options.line_ending)
        .write_to(writer)
        .with_context(|| format!("failed to write CSV to {}", destination_name))?;

    log::info!(
        "Exported {} sessions from {} to {}",
        records.len(),
        source_name,
        destination_name
    );
    Ok(summary)
}
