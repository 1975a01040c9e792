use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading sales records.
///
/// File-access problems are recoverable: the caller reports them and carries
/// on with no data. Problems with the shape of the data are fatal.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Error: file {} not found.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading file {}: {cause}", .path.display())]
    Unreadable { path: PathBuf, cause: csv::Error },

    #[error("{}: missing required column {field:?} (expected one of: {})", .path.display(), .expected.join(", "))]
    MissingColumn {
        path: PathBuf,
        field: &'static str,
        expected: &'static [&'static str],
    },

    #[error("{}: invalid record at line {line}", .path.display())]
    InvalidRecord {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    /// Reports whether this error should degrade to an empty data set rather
    /// than end the run.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Unreadable { .. })
    }
}

/// Errors from building a report.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    #[error("no sales records to report on")]
    EmptyInput,

    #[error("totals exceed the largest representable amount")]
    Overflow,
}
