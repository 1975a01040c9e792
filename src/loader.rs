use anyhow::Result;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use std::{
    fs::File,
    io::{self, Write},
    path::Path,
};

use crate::{
    error::LoadError,
    record::{SalesRecord, REQUIRED_COLUMNS},
};

/// Reads sales records from the CSV file at `path`.
///
/// The first row must be a header naming the columns described by
/// [`SalesRecord`]. A file with no header row at all yields no records.
///
/// # Errors
///
/// * [`LoadError::NotFound`] if there is no file at `path`
/// * [`LoadError::Unreadable`] if the file can't be opened or read, isn't
///   valid UTF-8, or has rows of inconsistent length
/// * [`LoadError::MissingColumn`] if the header lacks a required column
/// * [`LoadError::InvalidRecord`] if a quantity or revenue field isn't a
///   number
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<SalesRecord>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Unreadable {
            path: path.to_path_buf(),
            cause: e.into(),
        },
    })?;
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(file);
    let headers = rdr.headers().map_err(|e| classify(path, e))?.clone();
    if headers.is_empty() {
        debug!(path = %path.display(), "no header row, treating as empty");
        return Ok(Vec::new());
    }
    check_headers(path, &headers)?;
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: SalesRecord = result.map_err(|e| classify(path, e))?;
        records.push(record);
    }
    info!(path = %path.display(), records = records.len(), "loaded sales records");
    Ok(records)
}

/// Loads records as [`load_records`] does, but reports file-access problems
/// to `err` and returns no records instead of failing.
///
/// # Errors
///
/// Returns fatal [`LoadError`]s (missing columns, non-numeric fields), and
/// any error writing to `err`.
pub fn load_or_report(path: impl AsRef<Path>, err: &mut impl Write) -> Result<Vec<SalesRecord>> {
    match load_records(path) {
        Ok(records) => Ok(records),
        Err(e) if e.is_recoverable() => {
            debug!(error = ?e, "recovering from load failure");
            writeln!(err, "{e}")?;
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

fn check_headers(path: &Path, headers: &StringRecord) -> Result<(), LoadError> {
    for column in &REQUIRED_COLUMNS {
        if !headers.iter().any(|h| column.headers.contains(&h)) {
            return Err(LoadError::MissingColumn {
                path: path.to_path_buf(),
                field: column.field,
                expected: column.headers,
            });
        }
    }
    Ok(())
}

fn classify(path: &Path, err: csv::Error) -> LoadError {
    if let csv::ErrorKind::Deserialize { .. } = err.kind() {
        LoadError::InvalidRecord {
            path: path.to_path_buf(),
            line: err.position().map_or(0, csv::Position::line),
            source: err,
        }
    } else {
        LoadError::Unreadable {
            path: path.to_path_buf(),
            cause: err,
        }
    }
}
