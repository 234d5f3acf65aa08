//! Report generation: one consolidated report, or one per business group.

use std::fs;
use std::io::Write;

use tracing::{error, info};

use crate::config::ReportConfig;
use crate::constants;
use crate::core::period::DateRange;
use crate::core::query::{append_redirect, build_query, QueryFilters};
use crate::core::runner::{RunOutcome, Runner};
use crate::error::Result;

/// A command that was emitted, with its suffix and outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCommand {
    pub suffix: String,
    pub command: String,
    pub outcome: RunOutcome,
}

/// Build the full command (query + redirect) for one suffix.
#[must_use]
pub fn report_command(
    range: &DateRange,
    filters: &QueryFilters,
    suffix: &str,
    config: &ReportConfig,
) -> String {
    let query = build_query(range, filters, config);
    append_redirect(
        &query,
        range.end_year,
        range.end_month,
        suffix,
        &config.result_dir,
    )
}

/// Consolidated report using the caller's filters, written under `all`.
///
/// # Errors
///
/// Only if the output sink can't be written.
pub fn single_report<W: Write>(
    range: &DateRange,
    filters: &QueryFilters,
    config: &ReportConfig,
    runner: &mut Runner<W>,
) -> Result<Vec<ReportCommand>> {
    prepare_result_dir(config, runner);
    let command = report_command(range, filters, constants::SUFFIX_ALL, config);
    let outcome = runner.run_or_print(&command)?;
    Ok(vec![ReportCommand {
        suffix: constants::SUFFIX_ALL.to_string(),
        command,
        outcome,
    }])
}

/// One report per business group, in mapping order.
///
/// Each group's partition replaces whatever partition the caller passed.
/// A failing group is logged and the loop moves on.
///
/// # Errors
///
/// Only if the output sink can't be written.
pub fn business_report<W: Write>(
    range: &DateRange,
    filters: &QueryFilters,
    config: &ReportConfig,
    runner: &mut Runner<W>,
) -> Result<Vec<ReportCommand>> {
    prepare_result_dir(config, runner);

    let mut emitted = Vec::with_capacity(config.business.len());
    for group in config.business.groups() {
        let group_filters = filters.with_partition(group.partition.as_deref());
        let command = report_command(range, &group_filters, &group.suffix, config);
        let outcome = runner.run_or_print(&command)?;
        emitted.push(ReportCommand {
            suffix: group.suffix.clone(),
            command,
            outcome,
        });
    }
    Ok(emitted)
}

/// Log how many commands went out and how many failed.
pub fn log_summary(commands: &[ReportCommand]) {
    let failed = commands.iter().filter(|c| c.outcome.is_failure()).count();
    if failed > 0 {
        error!(total = commands.len(), failed, "finished with failures");
    } else {
        info!(total = commands.len(), "finished");
    }
}

/// Create the result directory when commands are about to write into it.
fn prepare_result_dir<W: Write>(config: &ReportConfig, runner: &Runner<W>) {
    if !runner.executes() || config.result_dir.is_dir() {
        return;
    }
    if let Err(e) = fs::create_dir_all(&config.result_dir) {
        error!(
            dir = %config.result_dir.display(),
            error = %e,
            "{}",
            constants::MSG_RESULT_DIR_FAILED
        );
    }
}
