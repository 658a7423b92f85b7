use std::path::PathBuf;

use thiserror::Error;

use crate::window::WindowLabel;

/// Fatal pipeline errors shared across the eventprep crates.
///
/// Only load-time and date-parse failures are fatal; every validation
/// concern is advisory and reported as a finding instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A configured window source file does not exist.
    #[error("missing source file: {0}")]
    MissingSource(PathBuf),
    /// `event_date` could not be parsed; the run cannot continue because
    /// downstream temporal logic needs a valid timeline.
    #[error("unparsable event_date {value:?} in window {window} at row {row}")]
    DateParse {
        window: WindowLabel,
        row: u64,
        value: String,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results returned by eventprep crates.
pub type Result<T> = std::result::Result<T, Error>;
