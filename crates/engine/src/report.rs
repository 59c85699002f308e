//! Category totals over a date range.

use crate::{DateRange, EngineError, ResultEngine};

/// Summed amount for one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: i64,
}

/// Category totals for every record whose date falls in `range`.
///
/// Categories appear in the order their first matching record was inserted.
/// Categories without matching records are absent. Every total, the grand
/// total included, fits in an `i64`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub range: DateRange,
    totals: Vec<CategoryTotal>,
    grand_total: i64,
}

impl Report {
    pub fn empty(range: DateRange) -> Self {
        Self {
            range,
            totals: Vec::new(),
            grand_total: 0,
        }
    }

    /// Adds `amount` to `category`, appending the category if unseen.
    ///
    /// Fails without touching the report when the category total or the grand
    /// total would overflow.
    pub fn add(&mut self, category: &str, amount: i64) -> ResultEngine<()> {
        let overflow = || EngineError::TotalOverflow(category.to_string());
        let grand_total = self.grand_total.checked_add(amount).ok_or_else(overflow)?;

        match self.totals.iter_mut().find(|t| t.category == category) {
            Some(entry) => entry.total = entry.total.checked_add(amount).ok_or_else(overflow)?,
            None => self.totals.push(CategoryTotal {
                category: category.to_string(),
                total: amount,
            }),
        }
        self.grand_total = grand_total;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn total_for(&self, category: &str) -> Option<i64> {
        self.totals
            .iter()
            .find(|t| t.category == category)
            .map(|t| t.total)
    }

    pub fn grand_total(&self) -> i64 {
        self.grand_total
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.totals.iter()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn range() -> DateRange {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        DateRange::new(day, day)
    }

    #[test]
    fn add_accumulates_and_keeps_first_seen_order() {
        let mut report = Report::empty(range());
        report.add("transport", 300).unwrap();
        report.add("food", 1500).unwrap();
        report.add("transport", 200).unwrap();

        let order: Vec<&str> = report.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(order, vec!["transport", "food"]);
        assert_eq!(report.total_for("transport"), Some(500));
        assert_eq!(report.grand_total(), 2000);
    }

    #[test]
    fn categories_are_case_sensitive() {
        let mut report = Report::empty(range());
        report.add("Food", 1).unwrap();
        report.add("food", 2).unwrap();
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn unknown_category_is_absent_not_zero() {
        let report = Report::empty(range());
        assert!(report.is_empty());
        assert_eq!(report.total_for("food"), None);
    }

    #[test]
    fn category_overflow_is_an_error() {
        let mut report = Report::empty(range());
        report.add("yacht", i64::MAX).unwrap();

        let err = report.add("yacht", 5).unwrap_err();
        assert_eq!(err, EngineError::TotalOverflow("yacht".to_string()));
        assert_eq!(report.total_for("yacht"), Some(i64::MAX));
    }

    #[test]
    fn grand_total_overflow_is_an_error() {
        let mut report = Report::empty(range());
        report.add("yacht", i64::MAX).unwrap();

        assert!(report.add("food", 1).is_err());
        assert_eq!(report.total_for("food"), None);
        assert_eq!(report.grand_total(), i64::MAX);
    }
}
