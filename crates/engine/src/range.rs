//! Inclusive calendar date ranges used by reports.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};

/// Days covered by the trailing "week" window, not counting today.
pub const WEEK_DAYS: u64 = 7;
/// Days covered by the trailing "month" window, not counting today.
pub const MONTH_DAYS: u64 = 30;

/// A `start..=end` pair of calendar dates.
///
/// `start <= end` is not enforced here: the shortcuts below always build valid
/// ranges and user supplied periods are checked where they are parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `today - 7 days ..= today`.
    pub fn trailing_week(today: NaiveDate) -> Self {
        Self::trailing(today, WEEK_DAYS)
    }

    /// `today - 30 days ..= today`. A fixed window, not a calendar month.
    pub fn trailing_month(today: NaiveDate) -> Self {
        Self::trailing(today, MONTH_DAYS)
    }

    /// First to last day of the calendar month before the one containing `today`.
    pub fn previous_calendar_month(today: NaiveDate) -> Self {
        let first_of_current = today.with_day(1).unwrap_or(today);
        let end = first_of_current.pred_opt().unwrap_or(first_of_current);
        let start = end.with_day(1).unwrap_or(end);
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    fn trailing(today: NaiveDate, days: u64) -> Self {
        let start = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.start, self.end)
    }
}
