//! Output side of the conversion.
//!
//! - [`csv`]: the CSV formatter
//! - [`open_destination`]: resolves the output argument to a writer
//!
//! # Example
//!
//! ```no_run
//! use extract_sessions::config::LineEnding;
//! use extract_sessions::output::{open_destination, CsvOutput};
//! use extract_sessions::source::StreamTarget;
//!
//! let writer = open_destination(&StreamTarget::Std).unwrap();
//! CsvOutput::new(&[], LineEnding::Lf).write_to(writer).unwrap();
//! ```

pub mod csv;

use std::fs::File;
use std::io::{self, Write};

use crate::error::ExtractError;
use crate::source::StreamTarget;

// Re-export main types
pub use csv::{CsvOutput, CsvOutputError, CSV_HEADER};

/// Open the CSV destination for writing.
///
/// `-` writes to standard output; a path is created or truncated. The
/// returned writer releases the file when dropped.
///
/// # Errors
///
/// Returns [`ExtractError::FileAccess`] if the path cannot be created.
pub fn open_destination(target: &StreamTarget) -> Result<Box<dyn Write>, ExtractError> {
    match target {
        StreamTarget::Std => {
            log::debug!("Writing CSV to stdout");
            Ok(Box::new(io::stdout().lock()))
        }
        StreamTarget::Path(path) => {
            log::debug!("Writing CSV to {}", path.display());
            let file = File::create(path).map_err(|source| ExtractError::FileAccess {
                path: path.clone(),
                source,
            })?;
            Ok(Box::new(file))
        }
    }
}
