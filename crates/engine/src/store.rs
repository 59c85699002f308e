//! The storage contract shared by every backend.

use chrono::NaiveDate;

use crate::{DateRange, EngineError, RecordId, Report, ResultEngine};

/// Append-only collection of dated, categorized amounts.
///
/// Implementations serialize concurrent writers so that no insert is lost,
/// and answer range queries from a consistent snapshot.
#[async_trait::async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Appends a new record and returns its identity. Never overwrites.
    async fn insert(&self, date: NaiveDate, category: &str, amount: i64) -> ResultEngine<RecordId>;

    /// Sums amounts per category over the records dated within `range`
    /// (inclusive), in first-seen category order. An empty result is not an
    /// error.
    async fn sum_by_category(&self, range: DateRange) -> ResultEngine<Report>;

    /// Totals for `today - 7 days ..= today`.
    async fn week_report(&self, today: NaiveDate) -> ResultEngine<Report> {
        self.sum_by_category(DateRange::trailing_week(today)).await
    }

    /// Totals for `today - 30 days ..= today`.
    async fn month_report(&self, today: NaiveDate) -> ResultEngine<Report> {
        self.sum_by_category(DateRange::trailing_month(today)).await
    }

    /// Totals for the whole calendar month preceding `today`.
    async fn previous_month_report(&self, today: NaiveDate) -> ResultEngine<Report> {
        self.sum_by_category(DateRange::previous_calendar_month(today))
            .await
    }

    /// Totals for a caller supplied, already validated range.
    async fn custom_report(&self, start: NaiveDate, end: NaiveDate) -> ResultEngine<Report> {
        self.sum_by_category(DateRange::new(start, end)).await
    }
}

/// Rejects records the store must never contain.
pub(crate) fn validate_entry(category: &str, amount: i64) -> ResultEngine<()> {
    if category.trim().is_empty() {
        return Err(EngineError::InvalidEntry(
            "category must not be empty".to_string(),
        ));
    }
    if amount < 0 {
        return Err(EngineError::InvalidEntry(
            "amount must be >= 0".to_string(),
        ));
    }
    Ok(())
}
