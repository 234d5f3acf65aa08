//! Command-line interface module.
//!
//! Provides argument parsing and the top-level report flow:
//! parse, compute dates, build command(s), print or execute.

pub mod args;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::ReportConfig;
use crate::core::business::{self, ReportCommand};
use crate::core::runner::Runner;
use crate::error::Result;

pub use args::Args;

/// Resolve the final configuration: file (or defaults) plus CLI overrides.
///
/// # Errors
///
/// Propagates config file read/parse failures.
pub fn resolve_config(args: &Args) -> Result<ReportConfig> {
    let config = ReportConfig::load(args.config.as_deref())?;
    Ok(config.with_overrides(args.fields.clone(), args.result_dir.clone()))
}

/// Sink for printed commands: the `--output` file or stdout.
///
/// # Errors
///
/// If the output file can't be created.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(io::stdout().lock()),
    })
}

/// Run one invocation against `today`, writing printed commands to `out`.
///
/// # Errors
///
/// Invalid dates are rejected before anything is built. Failing commands in
/// execute mode are logged and returned in the result, not raised.
pub fn run<W: Write>(
    args: &Args,
    config: &ReportConfig,
    today: NaiveDate,
    out: W,
) -> Result<Vec<ReportCommand>> {
    let range = args.date_range(today);
    range.validate()?;
    debug!(%range, business = args.business, execute = args.execute, "resolved period");

    let filters = args.filters();
    let mut runner = Runner::new(out, args.execute, config.shell.clone());

    let emitted = if args.business {
        business::business_report(&range, &filters, config, &mut runner)?
    } else {
        business::single_report(&range, &filters, config, &mut runner)?
    };

    if runner.executes() {
        business::log_summary(&emitted);
    }
    Ok(emitted)
}
