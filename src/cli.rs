//! Command-line interface definitions for extract_sessions.
//!
//! Both positional arguments are optional and default to `-`, the
//! placeholder for the standard streams.
//!
//! # Example
//!
//! ```bash
//! # Read from stdin, write to stdout
//! extract_sessions < sessions.xml > sessions.csv
//!
//! # Named files
//! extract_sessions sessions.xml sessions.csv
//!
//! # Read a file, write to stdout, names without the Sessions prefix
//! extract_sessions --strip-root sessions.xml -
//! ```

use clap::Parser;

use crate::source::StreamTarget;

/// Export SecureCRT XML session definitions to CSV.
///
/// Walks the `Sessions` key of a SecureCRT XML export and writes one
/// `name,address,port,protocol` row per session.
#[derive(Debug, Parser)]
#[command(name = "extract_sessions")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SecureCRT XML file to read, or '-' for stdin
    #[arg(value_name = "XML_INPUT", default_value = "-")]
    pub input: StreamTarget,

    /// CSV file to write, or '-' for stdout
    #[arg(value_name = "CSV_OUTPUT", default_value = "-")]
    pub output: StreamTarget,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Fail if the document has no Sessions key
    #[arg(long)]
    pub strict: bool,

    /// Use port 22 for sessions with an invalid port instead of failing
    #[arg(long)]
    pub lenient_ports: bool,

    /// Only export sessions that have a hostname
    #[arg(long)]
    pub require_hostname: bool,

    /// Leave the leading "Sessions" segment out of session names
    #[arg(long)]
    pub strip_root: bool,

    /// Terminate CSV records with CRLF instead of LF
    #[arg(long)]
    pub crlf: bool,
}
