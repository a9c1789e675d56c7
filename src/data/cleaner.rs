//! Amount Cleaner Module
//! Normalizes the currency-formatted amount columns into non-negative
//! numeric values.
//!
//! Canonical locale rule: `.` is always a thousands separator and `,` is the
//! decimal separator ("R$ 1.234,56" → 1234.56). A lone `.` is therefore also
//! treated as grouping, so "12.5" → 125.

use super::loader::{EXPENSE_AMOUNT, INCOME_AMOUNT};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Per-column accounting of cells that became 0. Blank/null cells are
/// `missing`; non-empty cells that failed numeric conversion (or produced a
/// negative / non-finite value) are `unparseable`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub missing: usize,
    pub unparseable: usize,
}

impl CleanReport {
    pub fn merge(self, other: CleanReport) -> CleanReport {
        CleanReport {
            missing: self.missing + other.missing,
            unparseable: self.unparseable + other.unparseable,
        }
    }
}

enum CellOutcome {
    Cleaned(f64),
    Missing,
    Unparseable,
}

/// Normalize a currency-formatted text amount. Returns `None` when the text
/// does not convert to a finite, non-negative number.
pub fn clean_amount_text(raw: &str) -> Option<f64> {
    let stripped = raw.replace("R$", "");
    let normalized = stripped.replace('.', "").replace(',', ".");
    let parsed = normalized.trim().parse::<f64>().ok()?;
    (parsed.is_finite() && parsed >= 0.0).then_some(parsed)
}

fn clean_text(raw: &str) -> CellOutcome {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellOutcome::Missing;
    }
    match clean_amount_text(trimmed) {
        Some(value) => CellOutcome::Cleaned(value),
        None => CellOutcome::Unparseable,
    }
}

fn clean_numeric(value: f64) -> CellOutcome {
    if value.is_finite() && value >= 0.0 {
        CellOutcome::Cleaned(value)
    } else {
        CellOutcome::Unparseable
    }
}

/// Already-numeric cells bypass text cleaning entirely.
fn clean_cell(value: &AnyValue) -> CellOutcome {
    match value {
        AnyValue::Null => CellOutcome::Missing,
        AnyValue::Float64(v) => clean_numeric(*v),
        AnyValue::Float32(v) => clean_numeric(*v as f64),
        AnyValue::Int64(v) => clean_numeric(*v as f64),
        AnyValue::Int32(v) => clean_numeric(*v as f64),
        AnyValue::Int16(v) => clean_numeric(*v as f64),
        AnyValue::Int8(v) => clean_numeric(*v as f64),
        AnyValue::UInt64(v) => clean_numeric(*v as f64),
        AnyValue::UInt32(v) => clean_numeric(*v as f64),
        AnyValue::UInt16(v) => clean_numeric(*v as f64),
        AnyValue::UInt8(v) => clean_numeric(*v as f64),
        AnyValue::String(s) => clean_text(s),
        AnyValue::StringOwned(s) => clean_text(s.as_str()),
        other => clean_text(other.to_string().trim_matches('"')),
    }
}

/// Rewrites amount columns in place with cleaned `f64` values.
pub struct AmountCleaner;

impl AmountCleaner {
    /// Clean both canonical amount columns. Missing and unparseable cells
    /// become 0 in the output; the report tells them apart.
    pub fn clean_amounts(df: &mut DataFrame) -> Result<CleanReport, CleanError> {
        let expense = Self::clean_column(df, EXPENSE_AMOUNT)?;
        let income = Self::clean_column(df, INCOME_AMOUNT)?;
        Ok(expense.merge(income))
    }

    /// Replace one column with its cleaned numeric values.
    pub fn clean_column(df: &mut DataFrame, column: &str) -> Result<CleanReport, CleanError> {
        let source = df.column(column)?.clone();

        let mut values = Vec::with_capacity(source.len());
        let mut report = CleanReport::default();

        for i in 0..source.len() {
            let outcome = match source.get(i) {
                Ok(value) => clean_cell(&value),
                Err(_) => CellOutcome::Missing,
            };
            match outcome {
                CellOutcome::Cleaned(v) => values.push(v),
                CellOutcome::Missing => {
                    report.missing += 1;
                    values.push(0.0);
                }
                CellOutcome::Unparseable => {
                    report.unparseable += 1;
                    values.push(0.0);
                }
            }
        }

        df.with_column(Series::new(column.into(), values))?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cleans_brazilian_currency_text() {
        assert_eq!(clean_amount_text("R$ 1.234,56"), Some(1234.56));
        assert_eq!(clean_amount_text("R$ 100,00"), Some(100.0));
        assert_eq!(clean_amount_text("100,00"), Some(100.0));
        assert_eq!(clean_amount_text("  R$ 7,50  "), Some(7.5));
        assert_eq!(clean_amount_text("42"), Some(42.0));
    }

    #[test]
    fn lone_period_is_a_thousands_separator() {
        assert_eq!(clean_amount_text("1.234"), Some(1234.0));
        assert_eq!(clean_amount_text("12.5"), Some(125.0));
    }

    #[test]
    fn rejects_unparseable_and_negative_text() {
        assert_eq!(clean_amount_text("abc"), None);
        assert_eq!(clean_amount_text(""), None);
        assert_eq!(clean_amount_text("R$"), None);
        assert_eq!(clean_amount_text("-100,00"), None);
        assert_eq!(clean_amount_text("1,2,3"), None);
    }

    #[test]
    fn clean_column_counts_missing_and_unparseable_cells() {
        let mut df = df!(
            EXPENSE_AMOUNT => &[
                Some("R$ 1.234,56"),
                Some("abc"),
                None::<&str>,
                Some(""),
                Some("R$ 100,00"),
            ],
            INCOME_AMOUNT => &[
                Some("R$ 500,00"),
                None::<&str>,
                None::<&str>,
                None::<&str>,
                None::<&str>,
            ],
        )
        .unwrap();

        let report = AmountCleaner::clean_amounts(&mut df).unwrap();
        assert_eq!(report.unparseable, 1);
        assert_eq!(report.missing, 6);

        let expenses = df.column(EXPENSE_AMOUNT).unwrap();
        let ca = expenses.as_materialized_series().f64().unwrap().clone();
        assert_eq!(ca.get(0), Some(1234.56));
        assert_eq!(ca.get(1), Some(0.0));
        assert_eq!(ca.get(2), Some(0.0));
        assert_eq!(ca.get(3), Some(0.0));
        assert_eq!(ca.get(4), Some(100.0));
    }

    #[test]
    fn numeric_cells_bypass_text_cleaning() {
        let mut df = df!(
            EXPENSE_AMOUNT => &[10.5f64, 0.0, 99.99],
            INCOME_AMOUNT => &[1.0f64, 2.0, 3.0],
        )
        .unwrap();

        let report = AmountCleaner::clean_amounts(&mut df).unwrap();
        assert_eq!(report.unparseable, 0);
        assert_eq!(report.missing, 0);

        let expenses = df.column(EXPENSE_AMOUNT).unwrap();
        let ca = expenses.as_materialized_series().f64().unwrap().clone();
        assert_eq!(ca.get(0), Some(10.5));
        assert_eq!(ca.get(2), Some(99.99));
    }

    proptest! {
        #[test]
        fn cleaning_never_panics_or_goes_negative(raw in "\\PC*") {
            if let Some(value) = clean_amount_text(&raw) {
                prop_assert!(value.is_finite());
                prop_assert!(value >= 0.0);
            }
        }
    }
}
