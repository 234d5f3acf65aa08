//! Build (and optionally run) `sacct` commands for monthly HPC billing.
//!
//! The default period is the previous calendar month. In business mode one
//! report is produced per partition group; otherwise a single consolidated
//! report is written under the `all` suffix.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use slurm_accts::config::ReportConfig;
//! use slurm_accts::core::period::DateRange;
//! use slurm_accts::core::query::{build_query, QueryFilters};
//!
//! let today = NaiveDate::from_ymd_opt(2023, 4, 2).unwrap();
//! let range = DateRange::previous_month(today);
//! let cmd = build_query(&range, &QueryFilters::default(), &ReportConfig::default());
//! assert!(cmd.contains("-S 2023-03-01"));
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;

pub use error::{Error, Result};
