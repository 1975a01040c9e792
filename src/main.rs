use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::{io, path::PathBuf};

use sales_summary::{Groups, DEFAULT_INPUT};

/// Summarises a sales CSV file: total revenue, best sellers, and each
/// product's share of revenue.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Sales data CSV file
    #[arg(default_value = DEFAULT_INPUT)]
    path: PathBuf,
    /// File of product groups, one `NAME | REGEX` per line
    #[arg(short, long)]
    groups: Option<PathBuf>,
    /// Log diagnostics to stderr (`RUST_LOG` takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let groups = match &args.groups {
        Some(path) => Groups::from_file(path)
            .with_context(|| format!("reading groups from {}", path.display()))?,
        None => Groups::new(),
    };
    sales_summary::run(
        &args.path,
        &groups,
        &mut io::stdout().lock(),
        &mut io::stderr(),
    )
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "sales_summary=debug"
        } else {
            "sales_summary=warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
