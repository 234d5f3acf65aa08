//! Reporting periods.
//!
//! A [`DateRange`] holds the raw start/end components as entered on the
//! command line. Validation and end-of-month clamping happen here, before any
//! command string is assembled.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::constants;
use crate::error::{Error, Result};

/// Inclusive accounting period, day precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start_year: u32,
    pub start_month: u32,
    pub start_day: u32,
    pub end_year: u32,
    pub end_month: u32,
    pub end_day: u32,
}

/// Number of days in `month` of `year`, leap aware.
///
/// Returns `None` when the month is not 1..=12 or the year is outside the
/// range chrono can represent.
#[must_use]
pub fn days_in_month(year: u32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let year = i32::try_from(year).ok()?;
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(first_of_next.pred_opt()?.day())
}

impl DateRange {
    /// The whole calendar month before `today`.
    ///
    /// January rolls back to December of the previous year.
    #[must_use]
    pub fn previous_month(today: NaiveDate) -> Self {
        let last = today - Days::new(u64::from(today.day()));
        let (_, year) = last.year_ce();
        Self {
            start_year: year,
            start_month: last.month(),
            start_day: 1,
            end_year: year,
            end_month: last.month(),
            end_day: last.day(),
        }
    }

    /// Check every component and the ordering of the two bounds.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDate`] for an out-of-range component,
    /// [`Error::InvalidRange`] when start falls after the clamped end.
    pub fn validate(&self) -> Result<()> {
        check_year("start year", self.start_year)?;
        check_year("end year", self.end_year)?;
        check_month("start month", self.start_month)?;
        check_month("end month", self.end_month)?;
        check_day("start day", self.start_day)?;
        check_day("end day", self.end_day)?;

        if let Some(last) = days_in_month(self.start_year, self.start_month) {
            if self.start_day > last {
                return Err(Error::InvalidDate {
                    field: "start day",
                    value: self.start_day,
                    reason: "past the end of the start month",
                });
            }
        }

        let end = self.clamped();
        let start_key = (self.start_year, self.start_month, self.start_day);
        let end_key = (end.end_year, end.end_month, end.end_day);
        if start_key > end_key {
            return Err(Error::InvalidRange {
                start: self.start_date(),
                end: end.end_date(),
            });
        }
        Ok(())
    }

    /// Copy with the end day snapped to the last day of its month.
    ///
    /// Only applies when the end day is 28 or later and is not already the
    /// last day, so "31" in April becomes 30 and "28" in March becomes 31.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let Some(last) = days_in_month(self.end_year, self.end_month) else {
            return *self;
        };
        if self.end_day >= 28 && self.end_day != last {
            debug!(from = self.end_day, to = last, "{}", constants::MSG_CLAMPED_END_DAY);
            return Self {
                end_day: last,
                ..*self
            };
        }
        *self
    }

    /// `YYYY-MM-DD` for the first day.
    #[must_use]
    pub fn start_date(&self) -> String {
        format_date(self.start_year, self.start_month, self.start_day)
    }

    /// `YYYY-MM-DD` for the last day (unclamped).
    #[must_use]
    pub fn end_date(&self) -> String {
        format_date(self.end_year, self.end_month, self.end_day)
    }

    /// `YYYY-MM-DDT23:59:59` for the last day (unclamped).
    #[must_use]
    pub fn end_bound(&self) -> String {
        format!("{}{}", self.end_date(), constants::END_OF_DAY)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_date(), self.end_date())
    }
}

/// Zero-pad a year to four digits.
#[must_use]
pub fn pad_year(year: u32) -> String {
    format!("{year:04}")
}

/// Zero-pad a month or day to two digits.
#[must_use]
pub fn pad2(value: u32) -> String {
    format!("{value:02}")
}

fn format_date(year: u32, month: u32, day: u32) -> String {
    format!("{}-{}-{}", pad_year(year), pad2(month), pad2(day))
}

fn check_year(field: &'static str, value: u32) -> Result<()> {
    if (1..=9999).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidDate {
            field,
            value,
            reason: "expected 1..=9999",
        })
    }
}

fn check_month(field: &'static str, value: u32) -> Result<()> {
    if (1..=12).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidDate {
            field,
            value,
            reason: "expected 1..=12",
        })
    }
}

fn check_day(field: &'static str, value: u32) -> Result<()> {
    if (1..=31).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidDate {
            field,
            value,
            reason: "expected 1..=31",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(start: (u32, u32, u32), end: (u32, u32, u32)) -> DateRange {
        DateRange {
            start_year: start.0,
            start_month: start.1,
            start_day: start.2,
            end_year: end.0,
            end_month: end.1,
            end_day: end.2,
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2023, 1), Some(31));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2023, 4), Some(30));
        assert_eq!(days_in_month(2023, 12), Some(31));
        assert_eq!(days_in_month(2023, 0), None);
        assert_eq!(days_in_month(2023, 13), None);
    }

    #[test]
    fn test_previous_month_leap_february() {
        let r = DateRange::previous_month(date(2024, 3, 15));
        assert_eq!(r, range((2024, 2, 1), (2024, 2, 29)));
    }

    #[test]
    fn test_previous_month_plain_february() {
        let r = DateRange::previous_month(date(2023, 3, 1));
        assert_eq!(r, range((2023, 2, 1), (2023, 2, 28)));
    }

    #[test]
    fn test_previous_month_january_rolls_back() {
        let r = DateRange::previous_month(date(2025, 1, 31));
        assert_eq!(r, range((2024, 12, 1), (2024, 12, 31)));
    }

    #[test]
    fn test_previous_month_day_count_matches_calendar() {
        for month in 1..=12 {
            let today = date(2024, month, 10);
            let r = DateRange::previous_month(today);
            assert_eq!(r.start_day, 1);
            assert_eq!(
                Some(r.end_day),
                days_in_month(r.end_year, r.end_month),
                "month before {today}"
            );
        }
    }

    #[test]
    fn test_clamp_february() {
        let r = range((2023, 2, 1), (2023, 2, 30)).clamped();
        assert_eq!(r.end_day, 28);
    }

    #[test]
    fn test_clamp_extends_short_end_day() {
        let r = range((2023, 3, 1), (2023, 3, 28)).clamped();
        assert_eq!(r.end_day, 31);
    }

    #[test]
    fn test_clamp_leaves_early_days_alone() {
        let r = range((2023, 3, 1), (2023, 3, 15));
        assert_eq!(r.clamped(), r);
        let r = range((2023, 4, 1), (2023, 4, 30));
        assert_eq!(r.clamped(), r);
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad2(1), "01");
        assert_eq!(pad2(12), "12");
        assert_eq!(pad_year(99), "0099");
        assert_eq!(pad_year(2023), "2023");
    }

    #[test]
    fn test_bounds() {
        let r = range((2023, 3, 1), (2023, 3, 31));
        assert_eq!(r.start_date(), "2023-03-01");
        assert_eq!(r.end_bound(), "2023-03-31T23:59:59");
        assert_eq!(r.to_string(), "2023-03-01..2023-03-31");
    }

    #[test]
    fn test_validate_accepts_normal_range() {
        assert!(range((2023, 3, 1), (2023, 3, 31)).validate().is_ok());
        assert!(range((2023, 2, 1), (2023, 2, 30)).validate().is_ok());
        assert!(range((99, 1, 1), (99, 1, 31)).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_month() {
        let err = range((2023, 13, 1), (2023, 12, 31)).validate().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidDate {
                field: "start month",
                value: 13,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_bad_days() {
        assert!(range((2023, 3, 0), (2023, 3, 31)).validate().is_err());
        assert!(range((2023, 3, 1), (2023, 3, 32)).validate().is_err());
        assert!(range((2023, 2, 30), (2023, 3, 31)).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_reversed_range() {
        let err = range((2023, 4, 1), (2023, 3, 31)).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
        assert_eq!(
            err.to_string(),
            "start date 2023-04-01 is after end date 2023-03-31"
        );
    }
}
