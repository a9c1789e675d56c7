//! Ledger Splitter Module
//! Projects the cleaned unified table into independent expense and income
//! record tables.

use super::loader::{
    EXPENSE_AMOUNT, EXPENSE_CATEGORY, EXPENSE_DATE, EXPENSE_DESCRIPTION, INCOME_AMOUNT,
    INCOME_CATEGORY, INCOME_DATE, INCOME_DESCRIPTION,
};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Row-drop policy applied after projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPolicy {
    /// Drop rows missing a date or category. A zero amount never causes row
    /// loss; a missing description becomes "".
    #[default]
    DropIncomplete,
    /// Keep every row that has anything on this side; missing text fields
    /// become "".
    KeepAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Expense,
    Income,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Expense => "Expenses",
            Side::Income => "Income",
        }
    }

    fn columns(&self) -> [&'static str; 4] {
        match self {
            Side::Expense => [
                EXPENSE_DATE,
                EXPENSE_CATEGORY,
                EXPENSE_DESCRIPTION,
                EXPENSE_AMOUNT,
            ],
            Side::Income => [
                INCOME_DATE,
                INCOME_CATEGORY,
                INCOME_DESCRIPTION,
                INCOME_AMOUNT,
            ],
        }
    }
}

/// One cleaned, typed row belonging to one side of the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

/// All records of one side.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerTable {
    pub side: Side,
    pub records: Vec<Record>,
}

/// Project the cleaned table into the two side tables.
pub fn split(df: &DataFrame, policy: DropPolicy) -> Result<(LedgerTable, LedgerTable), SplitError> {
    Ok((
        project_side(df, Side::Expense, policy)?,
        project_side(df, Side::Income, policy)?,
    ))
}

fn project_side(df: &DataFrame, side: Side, policy: DropPolicy) -> Result<LedgerTable, SplitError> {
    let [date_col, category_col, description_col, amount_col] = side.columns();
    let dates = df.column(date_col)?;
    let categories = df.column(category_col)?;
    let descriptions = df.column(description_col)?;
    let amounts = df.column(amount_col)?;

    let mut records = Vec::new();
    for i in 0..df.height() {
        let date = text_value(dates, i);
        let category = text_value(categories, i);
        let description = text_value(descriptions, i);
        let amount = numeric_value(amounts, i);

        // A row that is entirely empty on this side is not a record under
        // either policy (the sheet holds two side-by-side tables of unequal
        // length).
        if date.is_none() && category.is_none() && description.is_none() && amount == 0.0 {
            continue;
        }

        match policy {
            DropPolicy::DropIncomplete => {
                let (Some(date), Some(category)) = (date, category) else {
                    continue;
                };
                records.push(Record {
                    date,
                    category,
                    description: description.unwrap_or_default(),
                    amount,
                });
            }
            DropPolicy::KeepAll => records.push(Record {
                date: date.unwrap_or_default(),
                category: category.unwrap_or_default(),
                description: description.unwrap_or_default(),
                amount,
            }),
        }
    }

    Ok(LedgerTable { side, records })
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn text_value(column: &Column, i: usize) -> Option<String> {
    match column.get(i).ok()? {
        AnyValue::Null => None,
        AnyValue::String(s) => non_blank(s),
        AnyValue::StringOwned(s) => non_blank(s.as_str()),
        other => non_blank(other.to_string().trim_matches('"')),
    }
}

fn numeric_value(column: &Column, i: usize) -> f64 {
    match column.get(i) {
        Ok(AnyValue::Float64(v)) => v,
        Ok(AnyValue::Float32(v)) => v as f64,
        Ok(AnyValue::Int64(v)) => v as f64,
        Ok(AnyValue::Int32(v)) => v as f64,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df!(
            EXPENSE_DATE => &[Some("Jan"), None::<&str>, Some("Feb")],
            EXPENSE_CATEGORY => &[Some("Food"), Some("Rent"), None::<&str>],
            EXPENSE_DESCRIPTION => &[Some("Lunch"), None::<&str>, None::<&str>],
            EXPENSE_AMOUNT => &[100.0f64, 50.0, 25.0],
            INCOME_DATE => &[Some("Jan"), None::<&str>, None::<&str>],
            INCOME_CATEGORY => &[Some("Salary"), None::<&str>, None::<&str>],
            INCOME_DESCRIPTION => &[Some("Pay"), None::<&str>, None::<&str>],
            INCOME_AMOUNT => &[500.0f64, 0.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn drop_incomplete_requires_date_and_category() {
        let (expenses, income) = split(&sample_df(), DropPolicy::DropIncomplete).unwrap();

        assert_eq!(expenses.records.len(), 1);
        assert_eq!(
            expenses.records[0],
            Record {
                date: "Jan".into(),
                category: "Food".into(),
                description: "Lunch".into(),
                amount: 100.0,
            }
        );

        assert_eq!(income.records.len(), 1);
        assert_eq!(income.records[0].category, "Salary");
    }

    #[test]
    fn keep_all_keeps_partial_rows_with_blank_labels() {
        let (expenses, income) = split(&sample_df(), DropPolicy::KeepAll).unwrap();

        assert_eq!(expenses.records.len(), 3);
        assert_eq!(expenses.records[1].date, "");
        assert_eq!(expenses.records[1].category, "Rent");
        assert_eq!(expenses.records[1].amount, 50.0);

        // Rows with nothing on the income side are not records.
        assert_eq!(income.records.len(), 1);
    }

    #[test]
    fn zero_amount_never_causes_row_loss() {
        let df = df!(
            EXPENSE_DATE => &[Some("Jan")],
            EXPENSE_CATEGORY => &[Some("Food")],
            EXPENSE_DESCRIPTION => &[None::<&str>],
            EXPENSE_AMOUNT => &[0.0f64],
            INCOME_DATE => &[None::<&str>],
            INCOME_CATEGORY => &[None::<&str>],
            INCOME_DESCRIPTION => &[None::<&str>],
            INCOME_AMOUNT => &[0.0f64],
        )
        .unwrap();

        let (expenses, _) = split(&df, DropPolicy::DropIncomplete).unwrap();
        assert_eq!(expenses.records.len(), 1);
        assert_eq!(expenses.records[0].amount, 0.0);
    }
}
