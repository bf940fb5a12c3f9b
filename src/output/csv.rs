//! CSV output formatter for extracted sessions.
//!
//! One row is generated for each session, after a header row that is written
//! even when there are no sessions.
//!
//! # Columns
//!
//! - `name`: Slash-joined key path of the session
//! - `address`: Hostname or IP address (may be empty)
//! - `port`: SSH2 port
//! - `protocol`: Protocol name
//!
//! Fields containing a comma, quote or line break are quoted, with embedded
//! quotes doubled. Records end in `\n` unless [`LineEnding::Crlf`] is chosen.
//!
//! # Example
//!
//! ```
//! use extract_sessions::config::LineEnding;
//! use extract_sessions::output::csv::CsvOutput;
//! use extract_sessions::sessions::SessionRecord;
//!
//! let records = vec![SessionRecord::new(&["Sessions".to_string(), "db".to_string()], Some("db1".into()), None, None)];
//! let output = CsvOutput::new(&records, LineEnding::Lf);
//! assert_eq!(output.to_string().unwrap(), "name,address,port,protocol\nSessions/db,db1,22,SSH2\n");
//! ```

use std::io;

use thiserror::Error;

use crate::config::LineEnding;
use crate::sessions::SessionRecord;

/// Header row, in column order.
pub const CSV_HEADER: [&str; 4] = ["name", "address", "port", "protocol"];

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    records: &'a [SessionRecord],
    line_ending: LineEnding,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(records: &'a [SessionRecord], line_ending: LineEnding) -> Self {
        Self {
            records,
            line_ending,
        }
    }

    /// Write the CSV output to the given writer.
    ///
    /// Rows already written stay in `writer` if a later row fails.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let terminator = match self.line_ending {
            LineEnding::Lf => csv::Terminator::Any(b'\n'),
            LineEnding::Crlf => csv::Terminator::CRLF,
        };

        // Headers are written by hand so an empty export still gets one.
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(terminator)
            .from_writer(writer);

        csv_writer.write_record(CSV_HEADER)?;
        for record in self.records {
            csv_writer.serialize(record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
