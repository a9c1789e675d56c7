//! Pipeline Module
//! Computation entry points, independent of any presentation layer: fetch a
//! source into the canonical raw table, then clean, split and aggregate it.

use crate::data::{
    split, AmountCleaner, CleanError, CleanReport, DropPolicy, FetchError, LedgerTable,
    LoaderError, SheetFetcher, SheetLoader, SplitError,
};
use crate::stats::{timeline, Aggregator, LedgerSummary, TimelinePoint, DEFAULT_TOP_N};
use polars::prelude::DataFrame;
use std::path::PathBuf;
use thiserror::Error;

/// Where the raw table comes from.
#[derive(Debug, Clone)]
pub enum Source {
    Url(String),
    Path(PathBuf),
}

#[derive(Debug, Clone, Copy)]
pub struct AnalyzeOptions {
    pub drop_policy: DropPolicy,
    pub top_n: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            drop_policy: DropPolicy::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Clean(#[from] CleanError),
    #[error(transparent)]
    Split(#[from] SplitError),
}

/// Everything the dashboard shows for one run.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub summary: LedgerSummary,
    pub expenses: LedgerTable,
    pub income: LedgerTable,
    pub expense_timeline: Vec<TimelinePoint>,
    pub income_timeline: Vec<TimelinePoint>,
    pub clean_report: CleanReport,
}

/// Fetch (or read) the source and project it into the canonical raw table.
pub fn fetch_table(source: &Source) -> Result<DataFrame, PipelineError> {
    match source {
        Source::Url(url) => {
            tracing::info!(%url, "fetching spreadsheet export");
            let bytes = SheetFetcher::new().fetch_csv(url)?;
            Ok(SheetLoader::from_csv_bytes(&bytes)?)
        }
        Source::Path(path) => {
            tracing::info!(path = %path.display(), "reading local export");
            Ok(SheetLoader::from_csv_path(path)?)
        }
    }
}

/// Clean, split and aggregate a raw table into everything the dashboard
/// shows. Pure apart from logging; the input table is not modified.
pub fn analyze(df: &DataFrame, options: AnalyzeOptions) -> Result<DashboardData, PipelineError> {
    let mut table = df.clone();
    let clean_report = AmountCleaner::clean_amounts(&mut table)?;
    if clean_report.unparseable > 0 {
        tracing::warn!(
            cells = clean_report.unparseable,
            "amount cells defaulted to 0 after parse failure"
        );
    }

    let (expenses, income) = split(&table, options.drop_policy)?;

    let ((expense_summary, expense_timeline), (income_summary, income_timeline)) = rayon::join(
        || {
            (
                Aggregator::summarize_side(&expenses, options.top_n),
                timeline(&expenses.records),
            )
        },
        || {
            (
                Aggregator::summarize_side(&income, options.top_n),
                timeline(&income.records),
            )
        },
    );

    let summary = LedgerSummary::from_sides(expense_summary, income_summary);
    tracing::info!(
        expenses = summary.total_expenses,
        income = summary.total_income,
        balance = summary.balance,
        missing_cells = clean_report.missing,
        "analysis complete"
    );

    Ok(DashboardData {
        summary,
        expenses,
        income,
        expense_timeline,
        income_timeline,
        clean_report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn raw_table() -> DataFrame {
        df!(
            "expense_date" => &[Some("Jan"), Some("Jan"), Some("Fev")],
            "expense_category" => &[Some("Food"), Some("Rent"), Some("Food")],
            "expense_description" => &[Some("-"), Some("-"), Some("-")],
            "expense_amount" => &[Some("R$ 100,00"), Some("abc"), Some("R$ 50,00")],
            "income_date" => &[Some("Jan"), None::<&str>, None::<&str>],
            "income_category" => &[Some("Salary"), None::<&str>, None::<&str>],
            "income_description" => &[Some("-"), None::<&str>, None::<&str>],
            "income_amount" => &[Some("R$ 500,00"), None::<&str>, None::<&str>],
        )
        .unwrap()
    }

    #[test]
    fn analyzes_the_reference_scenario() {
        let df = df!(
            "expense_date" => &["Jan"],
            "expense_category" => &["Food"],
            "expense_description" => &["-"],
            "expense_amount" => &["R$ 100,00"],
            "income_date" => &["Jan"],
            "income_category" => &["Salary"],
            "income_description" => &["-"],
            "income_amount" => &["R$ 500,00"],
        )
        .unwrap();

        let data = analyze(&df, AnalyzeOptions::default()).unwrap();
        assert_eq!(data.summary.total_expenses, 100.0);
        assert_eq!(data.summary.total_income, 500.0);
        assert_eq!(data.summary.balance, 400.0);
        assert_eq!(data.summary.top_expenses.len(), 1);
        assert_eq!(data.summary.top_expenses[0].category, "Food");
        assert_eq!(data.summary.top_expenses[0].total, 100.0);
        assert_eq!(data.summary.top_income[0].category, "Salary");
        assert_eq!(data.summary.top_income[0].total, 500.0);
    }

    #[test]
    fn unparseable_amounts_count_as_zero_and_are_reported() {
        let data = analyze(&raw_table(), AnalyzeOptions::default()).unwrap();

        assert_eq!(data.clean_report.unparseable, 1);
        assert_eq!(data.summary.total_expenses, 150.0);
        // "abc" keeps its row (zero amount), so Rent exists with no rank.
        assert_eq!(data.expenses.records.len(), 3);
        assert!(data.summary.top_expenses.iter().all(|c| c.category != "Rent"));
    }

    #[test]
    fn balance_identity_holds() {
        let data = analyze(&raw_table(), AnalyzeOptions::default()).unwrap();
        assert_eq!(
            data.summary.total_expenses + data.summary.balance,
            data.summary.total_income
        );
    }

    #[test]
    fn analysis_is_idempotent() {
        let df = raw_table();
        let first = analyze(&df, AnalyzeOptions::default()).unwrap();
        let second = analyze(&df, AnalyzeOptions::default()).unwrap();
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.expense_timeline, second.expense_timeline);
        assert_eq!(first.income_timeline, second.income_timeline);
    }

    #[test]
    fn timelines_follow_record_dates() {
        let data = analyze(&raw_table(), AnalyzeOptions::default()).unwrap();
        let labels: Vec<&str> = data
            .expense_timeline
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Jan", "Fev"]);
        assert_eq!(data.expense_timeline[0].total, 100.0);
        assert_eq!(data.expense_timeline[1].total, 50.0);
    }
}
