//! Error types for the account report engine.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors local to a single account record.
///
/// Raised while validating or evaluating one record; the classifier
/// propagates these immediately rather than skipping the record.
#[derive(Error, Debug)]
pub enum RecordError {
    /// A required column is absent from the record
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The `Created` value does not match the export format
    #[error("malformed `Created` timestamp `{value}`: expected `YYYY-MM-DD HH:MM:SS+00:00`")]
    MalformedTimestamp { value: String },
}

/// Errors that can occur while producing a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A record error with no positional context (iterator-based classification)
    #[error(transparent)]
    Record(#[from] RecordError),

    /// A record error tagged with its CSV row
    #[error("invalid account record at row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: RecordError,
    },

    /// A delta pair whose periods are not in strictly increasing order
    #[error("invalid period ordering: {older} is not strictly before {newer}")]
    InvalidPeriodOrdering {
        older: NaiveDateTime,
        newer: NaiveDateTime,
    },

    /// A snapshot filename the period cannot be derived from
    #[error("unrecognized report filename `{0}`: expected accounts-YYYYMMDD.csv")]
    InvalidReportFilename(String),

    /// Missing input file arguments
    #[error("Missing input file arguments. Usage: account-reports [--list-paid] [--plan-breakdown] [--header-format FMT] <oldest.csv> <middle.csv> <newest.csv>")]
    MissingArgument,
}
