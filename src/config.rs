//! Conversion options.
//!
//! The converter has no configuration file and reads no environment; every
//! knob comes from the command line and is collected into [`ExtractOptions`],
//! which the walker and the CSV writer borrow.

use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// What to do when a port field does not hold a valid port number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortPolicy {
    /// Stop the whole run with a field parse error.
    #[default]
    Abort,
    /// Log a warning and use the default port for that session.
    FallBackToDefault,
}

/// CSV record terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    Crlf,
}

/// Options controlling how sessions are extracted and written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Fail when the document has no `Sessions` key instead of exporting nothing.
    pub strict: bool,
    /// Handling of unparseable port values.
    pub port_policy: PortPolicy,
    /// Skip leaves whose hostname is missing or empty.
    pub require_hostname: bool,
    /// Leave the `Sessions` segment out of exported names.
    pub strip_root: bool,
    /// Record terminator for the CSV output.
    pub line_ending: LineEnding,
}

impl ExtractOptions {
    /// Collect the options given on the command line.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            strict: cli.strict,
            port_policy: if cli.lenient_ports {
                PortPolicy::FallBackToDefault
            } else {
                PortPolicy::Abort
            },
            require_hostname: cli.require_hostname,
            strip_root: cli.strip_root,
            line_ending: if cli.crlf {
                LineEnding::Crlf
            } else {
                LineEnding::Lf
            },
        }
    }
}
