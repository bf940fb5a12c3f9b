//! Structured error handling and exit codes.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while converting a session file.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// An input or output path could not be opened.
    #[error("cannot open {}", path.display())]
    FileAccess {
        /// The path that failed to open
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// The input is not well-formed XML.
    #[error("malformed XML in {source_name} at byte {position}: {message}")]
    XmlParse {
        /// `stdin` or the input path
        source_name: String,
        /// Reader offset where the problem was detected
        position: u64,
        /// Parser diagnostic
        message: String,
    },

    /// A typed field of a session could not be interpreted.
    #[error("session '{session}': field '{field}' has invalid value '{value}'")]
    FieldParse {
        /// Slash-joined session path
        session: String,
        /// Field element name
        field: String,
        /// Offending text
        value: String,
    },

    /// No `Sessions` key was found and strict mode is on.
    #[error("no <key name=\"Sessions\"> element found in {source_name}")]
    MissingSessions {
        /// `stdin` or the input path
        source_name: String,
    },
}

impl ExtractError {
    /// The exit code this error terminates the process with.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileAccess { .. } => ExitCode::FileAccess,
            Self::XmlParse { .. } => ExitCode::XmlParse,
            Self::FieldParse { .. } => ExitCode::FieldParse,
            Self::MissingSessions { .. } => ExitCode::MissingSessions,
        }
    }
}

/// Exit codes for the extract_sessions binary.
///
/// - 0: Success
/// - 1: General error (CSV serialization, write failure, anything unexpected)
/// - 2: Input or output path could not be opened
/// - 3: Input is not well-formed XML
/// - 4: A port field could not be parsed
/// - 5: No Sessions key (only with `--strict`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the CSV was written.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// An input or output path could not be opened.
    FileAccess = 2,
    /// The XML document is malformed.
    XmlParse = 3,
    /// A session field holds an unparseable value.
    FieldParse = 4,
    /// Strict mode found no Sessions key.
    MissingSessions = 5,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "XS000",
            Self::GeneralError => "XS001",
            Self::FileAccess => "XS002",
            Self::XmlParse => "XS003",
            Self::FieldParse => "XS004",
            Self::MissingSessions => "XS005",
        }
    }

    /// Pick the exit code for an application error.
    ///
    /// Anything that is not an [`ExtractError`] maps to `GeneralError`.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        err.downcast_ref::<ExtractError>()
            .map_or(Self::GeneralError, ExtractError::exit_code)
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "XS002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
        }
    }
}
