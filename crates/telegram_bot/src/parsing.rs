use chrono::NaiveDate;
use engine::DateRange;

/// Date format accepted for custom periods.
pub(crate) const PERIOD_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NewExpense {
    pub date: NaiveDate,
    pub category: String,
    pub amount: i64,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ParseError {
    #[error("Формат: категория сумма (пример: еда 1500)")]
    MalformedEntry,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum PeriodError {
    #[error("Неверный формат! Попробуйте снова: YYYY-MM-DD YYYY-MM-DD")]
    WrongTokenCount,
    #[error("Неверный формат дат! Попробуйте снова: YYYY-MM-DD YYYY-MM-DD")]
    InvalidDate,
    #[error("Начало периода позже конца! Попробуйте снова: YYYY-MM-DD YYYY-MM-DD")]
    StartAfterEnd,
}

/// Parses a free-text expense line.
///
/// Rules:
/// - exactly two whitespace separated tokens: `category amount`
/// - the amount is ASCII digits only (no sign, no separators)
/// - the category is kept verbatim, so it cannot contain spaces
pub(crate) fn parse_entry(input: &str, today: NaiveDate) -> Result<NewExpense, ParseError> {
    let mut tokens = input.split_whitespace();
    let (Some(category), Some(amount), None) = (tokens.next(), tokens.next(), tokens.next())
    else {
        return Err(ParseError::MalformedEntry);
    };

    if !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::MalformedEntry);
    }
    let amount = amount
        .parse::<i64>()
        .map_err(|_| ParseError::MalformedEntry)?;

    Ok(NewExpense {
        date: today,
        category: category.to_string(),
        amount,
    })
}

/// Parses `START END` as two ISO dates, rejecting a start later than the end.
pub(crate) fn parse_period(input: &str) -> Result<DateRange, PeriodError> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let [start, end] = tokens.as_slice() else {
        return Err(PeriodError::WrongTokenCount);
    };

    let start = NaiveDate::parse_from_str(start, PERIOD_DATE_FORMAT)
        .map_err(|_| PeriodError::InvalidDate)?;
    let end =
        NaiveDate::parse_from_str(end, PERIOD_DATE_FORMAT).map_err(|_| PeriodError::InvalidDate)?;
    if start > end {
        return Err(PeriodError::StartAfterEnd);
    }

    Ok(DateRange::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn category_and_amount_are_taken_verbatim() {
        let parsed = parse_entry("food 1500", today()).unwrap();
        assert_eq!(parsed.category, "food");
        assert_eq!(parsed.amount, 1500);
        assert_eq!(parsed.date, today());
    }

    #[test]
    fn case_and_punctuation_are_preserved() {
        let parsed = parse_entry("  Кофе-с-собой   350 ", today()).unwrap();
        assert_eq!(parsed.category, "Кофе-с-собой");
        assert_eq!(parsed.amount, 350);
    }

    #[test]
    fn leading_zeros_are_accepted() {
        let parsed = parse_entry("bus 0080", today()).unwrap();
        assert_eq!(parsed.amount, 80);
    }

    #[test]
    fn rejects_non_digit_amounts() {
        for input in ["food abc", "food 15.5", "food -10", "food +10", "food 1,500", "food 1_000"] {
            assert_eq!(
                parse_entry(input, today()),
                Err(ParseError::MalformedEntry),
                "{input}"
            );
        }
    }

    #[test]
    fn rejects_wrong_token_count() {
        for input in ["", "   ", "food", "too many tokens 1500", "food 10 20"] {
            assert_eq!(
                parse_entry(input, today()),
                Err(ParseError::MalformedEntry),
                "{input}"
            );
        }
    }

    #[test]
    fn rejects_amount_overflow() {
        let err = parse_entry("yacht 99999999999999999999", today()).unwrap_err();
        assert_eq!(err, ParseError::MalformedEntry);
    }

    #[test]
    fn period_accepts_two_iso_dates() {
        let range = parse_period("2025-01-01 2025-01-31").unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn period_single_day_is_valid() {
        let range = parse_period("2025-02-10 2025-02-10").unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn period_rejects_wrong_shapes() {
        assert_eq!(parse_period("2025-01-01"), Err(PeriodError::WrongTokenCount));
        assert_eq!(
            parse_period("2025-01-01 2025-01-02 2025-01-03"),
            Err(PeriodError::WrongTokenCount)
        );
        assert_eq!(
            parse_period("2025-13-01 2025-01-31"),
            Err(PeriodError::InvalidDate)
        );
        assert_eq!(parse_period("yesterday today"), Err(PeriodError::InvalidDate));
        assert_eq!(
            parse_period("2025-02-30 2025-03-01"),
            Err(PeriodError::InvalidDate)
        );
    }

    #[test]
    fn period_rejects_reversed_range() {
        assert_eq!(
            parse_period("2025-01-31 2025-01-01"),
            Err(PeriodError::StartAfterEnd)
        );
    }
}
