#![doc = include_str!("../README.md")]
use anyhow::Result;
use tracing::debug;

use std::{io::Write, path::Path};

mod aggregate;
mod error;
mod format;
mod groups;
mod loader;
mod money;
mod record;

pub use aggregate::{
    highest_revenue_product, most_sold_product, product_table, total_revenue, Product,
    ProductTable, Report,
};
pub use error::{LoadError, ReportError};
pub use groups::Groups;
pub use loader::{load_or_report, load_records};
pub use money::Money;
pub use record::SalesRecord;

/// The input file read when no path is given.
pub const DEFAULT_INPUT: &str = "sales_data.csv";

/// Reads sales data from `path`, and writes a summary report to `out`.
///
/// If the file is missing or unreadable, a single message goes to `err` and
/// nothing is written to `out`. If the file holds no records, nothing is
/// written at all. Product names are first mapped through `groups`.
///
/// # Errors
///
/// Returns fatal [`LoadError`]s (missing columns, non-numeric fields), and
/// any errors writing to `out` or `err`.
pub fn run(
    path: impl AsRef<Path>,
    groups: &Groups,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let records = load_or_report(path, err)?;
    if records.is_empty() {
        debug!("no sales records, skipping report");
        return Ok(());
    }
    let records = groups.regroup(records);
    let report = Report::generate(&records)?;
    write!(out, "{report}")?;
    Ok(())
}
