use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by the dataset engine.
///
/// Per-line parse failures are logged and skipped inside the loader, so
/// `Parse` only escapes through internal row handling; a load as a whole
/// fails only when the source cannot be read at all.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    /// The header line could not be read (malformed CSV framing or an I/O
    /// failure mid-stream).
    #[error("reading source: {0}")]
    Csv(#[from] csv::Error),
}
