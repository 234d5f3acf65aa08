//! `sacct` command assembly.

use std::path::Path;

use crate::config::ReportConfig;
use crate::constants;
use crate::core::period::{pad2, pad_year, DateRange};

/// Optional `sacct` filters. `None` means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilters {
    pub user: Option<String>,
    pub cluster: Option<String>,
    pub account: Option<String>,
    pub partition: Option<String>,
}

impl QueryFilters {
    /// Same filters with the partition replaced (or cleared).
    #[must_use]
    pub fn with_partition(&self, partition: Option<&str>) -> Self {
        Self {
            partition: partition.map(str::to_string),
            ..self.clone()
        }
    }
}

/// Build the `sacct` command line for `range` and `filters`.
///
/// The end day is clamped to the end of its month first. A missing user
/// filter becomes `-a` (all users) and a missing cluster filter `-L` (all
/// clusters); missing account and partition filters add nothing.
#[must_use]
pub fn build_query(range: &DateRange, filters: &QueryFilters, config: &ReportConfig) -> String {
    let range = range.clamped();

    let mut parts: Vec<String> = vec![config.sacct.clone()];

    parts.push(match &filters.user {
        Some(user) => flag("--user", user),
        None => constants::FLAG_ALL_USERS.to_string(),
    });
    parts.push(match &filters.cluster {
        Some(cluster) => flag("--clusters", cluster),
        None => constants::FLAG_ALL_CLUSTERS.to_string(),
    });
    if let Some(account) = &filters.account {
        parts.push(flag("--accounts", account));
    }
    if let Some(partition) = &filters.partition {
        parts.push(flag("--partition", partition));
    }

    parts.push(format!("-o {}", shell_words::quote(&config.fields)));
    parts.push(format!("-S {}", range.start_date()));
    parts.push(format!("-E {}", range.end_bound()));
    parts.push(constants::FLAG_TRAILER.to_string());

    parts.join(" ")
}

/// Report file name: `<YYYY>-<MM>-HPC-slurm-<suffix>.txt`.
#[must_use]
pub fn report_file_name(end_year: u32, end_month: u32, suffix: &str) -> String {
    format!(
        "{}-{}-{}-{suffix}.{}",
        pad_year(end_year),
        pad2(end_month),
        constants::REPORT_FILE_INFIX,
        constants::REPORT_FILE_EXT
    )
}

/// Append `&> <result_dir>/<report file>` so stdout and stderr both land in
/// the report file.
#[must_use]
pub fn append_redirect(
    command: &str,
    end_year: u32,
    end_month: u32,
    suffix: &str,
    result_dir: &Path,
) -> String {
    let target = result_dir.join(report_file_name(end_year, end_month, suffix));
    let target = target.to_string_lossy();
    format!("{command} &> {}", shell_words::quote(&target))
}

fn flag(name: &str, value: &str) -> String {
    format!("{name}={}", shell_words::quote(value))
}
