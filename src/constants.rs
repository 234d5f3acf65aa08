//! Application-wide constants and default configuration values.
//!
//! These are the built-in defaults. At runtime they are copied into an
//! immutable [`ReportConfig`](crate::config::ReportConfig), which may be
//! overridden by a config file and CLI flags.

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
/// Current application version (from Cargo.toml).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// === Path Configuration ===

/// Name of the config subdirectory under the user config dir.
pub const CONFIG_DIR_NAME: &str = "slurm-accts";
/// Name of the config file.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SLURM_ACCTS_CONFIG";

// === Report Defaults ===

/// Accounting command binary.
pub const DEFAULT_SACCT: &str = "sacct";
/// Shell used to execute commands (the redirect uses `&>`, a bashism).
pub const DEFAULT_SHELL: &str = "bash";
/// Fields requested from `sacct -o`.
pub const DEFAULT_FIELDS: &str =
    "JobID,User,Account,cluster,CPUTime,NNodes,NodeList,Partition,Elapsed,AllocCPUS,start,end";
/// Directory the report files are written to.
pub const DEFAULT_RESULT_DIR: &str = "./logs";
/// Suffix used by the consolidated (non-business) report.
pub const SUFFIX_ALL: &str = "all";

/// Partition groups and their report suffixes, in output order.
/// `None` means no partition filter.
pub const DEFAULT_BUSINESS_MAPPING: [(Option<&str>, &str); 5] = [
    (Some("pegasus_q,discovery_q,haswell_q"), "std"),
    (Some("smp_q"), "smp"),
    (Some("gpu_q"), "gpu"),
    (Some("orion_q"), "orion"),
    (None, SUFFIX_ALL),
];

// === Command Layout ===

/// Flag used when no user filter is given (all users).
pub const FLAG_ALL_USERS: &str = "-a";
/// Flag used when no cluster filter is given (all clusters).
pub const FLAG_ALL_CLUSTERS: &str = "-L";
/// Trailing flags: allocations only, truncate to window, parsable output.
pub const FLAG_TRAILER: &str = "-XTp";
/// Time appended to the end bound so the whole last day is covered.
pub const END_OF_DAY: &str = "T23:59:59";
/// Fixed part of the report file name between the date and the suffix.
pub const REPORT_FILE_INFIX: &str = "HPC-slurm";
/// Report file extension.
pub const REPORT_FILE_EXT: &str = "txt";

// === Messages ===

pub const MSG_CLAMPED_END_DAY: &str = "Auto adjusting end day";
pub const MSG_COMMAND_FAILED: &str = "Accounting command failed";
pub const MSG_SPAWN_FAILED: &str = "Failed to launch shell";
pub const MSG_RESULT_DIR_FAILED: &str = "Failed to create result directory";
