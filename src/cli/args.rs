//! Command-line argument definitions.

use std::ffi::OsString;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

use crate::constants;
use crate::core::period::DateRange;
use crate::core::query::QueryFilters;

/// Two-letter single-dash date flags and their long forms.
///
/// clap short flags are one character, so these are rewritten before parsing.
const LEGACY_DATE_FLAGS: [(&str, &str); 6] = [
    ("-sd", "--startday"),
    ("-sm", "--startmonth"),
    ("-sy", "--startyear"),
    ("-ed", "--endday"),
    ("-em", "--endmonth"),
    ("-ey", "--endyear"),
];

/// Construct the sacct command for monthly accounting reports.
///
/// Date components default to the whole previous calendar month.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Accounting start day [-sd]
    #[arg(long = "startday", value_name = "DAY")]
    pub start_day: Option<u32>,

    /// Accounting start month [-sm]
    #[arg(long = "startmonth", value_name = "MONTH")]
    pub start_month: Option<u32>,

    /// Accounting start year [-sy]
    #[arg(long = "startyear", value_name = "YEAR")]
    pub start_year: Option<u32>,

    /// Accounting end day, 28 or later snaps to the end of the month [-ed]
    #[arg(long = "endday", value_name = "DAY")]
    pub end_day: Option<u32>,

    /// Accounting end month [-em]
    #[arg(long = "endmonth", value_name = "MONTH")]
    pub end_month: Option<u32>,

    /// Accounting end year [-ey]
    #[arg(long = "endyear", value_name = "YEAR")]
    pub end_year: Option<u32>,

    /// Only jobs charged to this account (default: all accounts)
    #[arg(short = 'a', long)]
    pub account: Option<String>,

    /// Only jobs on this cluster (default: all clusters)
    #[arg(short = 'c', long)]
    pub cluster: Option<String>,

    /// Only jobs of this user (default: all users)
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// Only jobs in this partition (default: all partitions)
    #[arg(short = 'p', long)]
    pub partition: Option<String>,

    /// Comma-separated sacct field list
    #[arg(short = 'f', long)]
    pub fields: Option<String>,

    /// Directory the report files are written to
    #[arg(short = 'r', long = "resultdir", value_name = "DIR")]
    pub result_dir: Option<PathBuf>,

    /// One report per business partition group instead of a single report
    #[arg(short = 'b', long)]
    pub business: bool,

    /// Run the commands instead of printing them
    #[arg(short = 'x', long)]
    pub execute: bool,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Write printed commands to this file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE", env = constants::CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse from the process arguments, accepting `-sd`-style date flags.
    #[must_use]
    pub fn parse_with_legacy_flags() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args_os()))
    }

    /// Date range from the flags, falling back to the month before `today`
    /// for any component left unset.
    #[must_use]
    pub fn date_range(&self, today: NaiveDate) -> DateRange {
        let defaults = DateRange::previous_month(today);
        DateRange {
            start_year: self.start_year.unwrap_or(defaults.start_year),
            start_month: self.start_month.unwrap_or(defaults.start_month),
            start_day: self.start_day.unwrap_or(defaults.start_day),
            end_year: self.end_year.unwrap_or(defaults.end_year),
            end_month: self.end_month.unwrap_or(defaults.end_month),
            end_day: self.end_day.unwrap_or(defaults.end_day),
        }
    }

    #[must_use]
    pub fn filters(&self) -> QueryFilters {
        QueryFilters {
            user: self.user.clone(),
            cluster: self.cluster.clone(),
            account: self.account.clone(),
            partition: self.partition.clone(),
        }
    }
}

/// Rewrite `-sd 5` / `-sd=5` (and the other date flags) to their long form.
///
/// Everything after a bare `--` is left untouched.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut seen_terminator = false;
    args.into_iter()
        .map(|arg| {
            let arg: OsString = arg.into();
            if seen_terminator {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                seen_terminator = true;
                return arg;
            }
            for (short, long) in LEGACY_DATE_FLAGS {
                if text == short {
                    return OsString::from(long);
                }
                if let Some(value) = text.strip_prefix(short).and_then(|r| r.strip_prefix('=')) {
                    return OsString::from(format!("{long}={value}"));
                }
            }
            arg
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["slurm-accts"];
        full.extend_from_slice(argv);
        Args::try_parse_from(normalize_legacy_flags(full)).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 4, 12).unwrap()
    }

    #[test]
    fn test_normalize_legacy_flags() {
        let out = normalize_legacy_flags(["prog", "-sd", "3", "-em=4", "-d", "--", "-sy"]);
        let out: Vec<&str> = out.iter().map(|s| s.to_str().unwrap()).collect();
        assert_eq!(
            out,
            ["prog", "--startday", "3", "--endmonth=4", "-d", "--", "-sy"]
        );
    }

    #[test]
    fn test_defaults_are_previous_month() {
        let args = parse(&[]);
        let range = args.date_range(today());
        assert_eq!(range, DateRange::previous_month(today()));
        assert_eq!((range.start_month, range.end_day), (3, 31));
        assert!(!args.business);
        assert!(!args.execute);
        assert_eq!(args.filters(), QueryFilters::default());
    }

    #[test]
    fn test_legacy_date_flags() {
        let args = parse(&[
            "-sd", "1", "-sm", "2", "-sy", "2024", "-ed", "29", "-em", "2", "-ey", "2024",
        ]);
        let range = args.date_range(today());
        assert_eq!(range.start_date(), "2024-02-01");
        assert_eq!(range.end_date(), "2024-02-29");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let args = parse(&["--startday", "15"]);
        let range = args.date_range(today());
        assert_eq!(range.start_date(), "2023-03-15");
        assert_eq!(range.end_date(), "2023-03-31");
    }

    #[test]
    fn test_short_flags() {
        let args = parse(&[
            "-u", "alice", "-c", "pegasus", "-a", "physics", "-p", "gpu_q", "-f", "JobID", "-r",
            "/tmp/r", "-b", "-x", "-d", "-o", "out.txt",
        ]);
        assert_eq!(args.user.as_deref(), Some("alice"));
        assert_eq!(args.cluster.as_deref(), Some("pegasus"));
        assert_eq!(args.account.as_deref(), Some("physics"));
        assert_eq!(args.partition.as_deref(), Some("gpu_q"));
        assert_eq!(args.fields.as_deref(), Some("JobID"));
        assert_eq!(args.result_dir, Some(PathBuf::from("/tmp/r")));
        assert!(args.business && args.execute && args.debug);
        assert_eq!(args.output, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_non_numeric_date_is_rejected() {
        let argv = normalize_legacy_flags(["slurm-accts", "-sd", "first"]);
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_negative_date_is_rejected() {
        let argv = normalize_legacy_flags(["slurm-accts", "--endmonth=-1"]);
        assert!(Args::try_parse_from(argv).is_err());
    }
}
