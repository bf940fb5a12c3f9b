//! Stream resolution for the `-` placeholder convention.
//!
//! Both positional arguments accept either a filesystem path or `-`, which
//! selects the process's standard input (for the XML source) or standard
//! output (for the CSV destination). [`StreamTarget`] captures that choice
//! once, at argument-parsing time; opening is a single branch on it.

use std::convert::Infallible;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ExtractError;

/// The reserved placeholder selecting a standard stream.
pub const STD_STREAM_PLACEHOLDER: &str = "-";

/// Where a stream comes from or goes to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StreamTarget {
    /// Standard input or standard output, depending on direction.
    #[default]
    Std,
    /// A named file.
    Path(PathBuf),
}

impl StreamTarget {
    /// Whether this target is the standard stream placeholder.
    #[must_use]
    pub fn is_std(&self) -> bool {
        matches!(self, Self::Std)
    }

    /// Human-readable name used in diagnostics.
    ///
    /// `std_label` is what the standard stream should be called
    /// (`"stdin"` or `"stdout"`).
    #[must_use]
    pub fn label(&self, std_label: &str) -> String {
        match self {
            Self::Std => std_label.to_string(),
            Self::Path(path) => path.display().to_string(),
        }
    }

    /// Open this target for reading.
    ///
    /// Standard input is locked, not closed, when the reader is dropped.
    /// A named file is closed when the returned reader goes out of scope.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::FileAccess`] if the path cannot be opened.
    pub fn open_input(&self) -> Result<Box<dyn BufRead>, ExtractError> {
        match self {
            Self::Std => {
                log::debug!("Reading XML from stdin");
                Ok(Box::new(io::stdin().lock()))
            }
            Self::Path(path) => {
                log::debug!("Reading XML from {}", path.display());
                let file = File::open(path).map_err(|source| ExtractError::FileAccess {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

impl FromStr for StreamTarget {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == STD_STREAM_PLACEHOLDER {
            Ok(Self::Std)
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for StreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Std => write!(f, "{}", STD_STREAM_PLACEHOLDER),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
