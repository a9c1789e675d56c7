//! Ledger Aggregator Module
//! Totals, net balance and top-N category sums. Pure functions of their
//! input tables.

use crate::data::{LedgerTable, Record};
use std::collections::HashMap;

pub const DEFAULT_TOP_N: usize = 3;

/// One category and its summed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Aggregates for one side of the ledger.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SideSummary {
    pub total: f64,
    pub top_categories: Vec<CategoryTotal>,
}

/// The full aggregate set shown in the dashboard header.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSummary {
    pub total_expenses: f64,
    pub total_income: f64,
    pub balance: f64,
    pub top_expenses: Vec<CategoryTotal>,
    pub top_income: Vec<CategoryTotal>,
}

impl LedgerSummary {
    pub fn from_sides(expense: SideSummary, income: SideSummary) -> Self {
        Self {
            total_expenses: expense.total,
            total_income: income.total,
            balance: income.total - expense.total,
            top_expenses: expense.top_categories,
            top_income: income.top_categories,
        }
    }
}

pub struct Aggregator;

impl Aggregator {
    /// Sum of amounts; an empty table totals 0.
    pub fn total(records: &[Record]) -> f64 {
        records.iter().map(|r| r.amount).sum()
    }

    /// The N categories with the largest summed amount. Groups keep
    /// first-encounter order and the descending sort is stable, so ties keep
    /// that order. Categories whose sum is zero are excluded.
    pub fn top_categories(records: &[Record], n: usize) -> Vec<CategoryTotal> {
        let mut groups: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for record in records {
            match index.get(record.category.as_str()) {
                Some(&i) => groups[i].total += record.amount,
                None => {
                    index.insert(record.category.as_str(), groups.len());
                    groups.push(CategoryTotal {
                        category: record.category.clone(),
                        total: record.amount,
                    });
                }
            }
        }

        groups.retain(|g| g.total > 0.0);
        groups.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
        groups.truncate(n);
        groups
    }

    pub fn summarize_side(table: &LedgerTable, top_n: usize) -> SideSummary {
        SideSummary {
            total: Self::total(&table.records),
            top_categories: Self::top_categories(&table.records, top_n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Side;

    fn record(date: &str, category: &str, amount: f64) -> Record {
        Record {
            date: date.into(),
            category: category.into(),
            description: "-".into(),
            amount,
        }
    }

    fn table(side: Side, records: Vec<Record>) -> LedgerTable {
        LedgerTable { side, records }
    }

    #[test]
    fn empty_table_totals_zero() {
        let t = table(Side::Expense, vec![]);
        let summary = Aggregator::summarize_side(&t, DEFAULT_TOP_N);
        assert_eq!(summary.total, 0.0);
        assert!(summary.top_categories.is_empty());
    }

    fn summarize(expenses: &LedgerTable, income: &LedgerTable) -> LedgerSummary {
        LedgerSummary::from_sides(
            Aggregator::summarize_side(expenses, DEFAULT_TOP_N),
            Aggregator::summarize_side(income, DEFAULT_TOP_N),
        )
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let expenses = table(Side::Expense, vec![record("Jan", "Food", 100.0)]);
        let income = table(Side::Income, vec![record("Jan", "Salary", 500.0)]);

        let summary = summarize(&expenses, &income);
        assert_eq!(summary.total_expenses, 100.0);
        assert_eq!(summary.total_income, 500.0);
        assert_eq!(summary.balance, 400.0);
        assert_eq!(
            summary.total_expenses + summary.balance,
            summary.total_income
        );
        assert_eq!(summary.top_expenses, vec![CategoryTotal { category: "Food".into(), total: 100.0 }]);
        assert_eq!(summary.top_income, vec![CategoryTotal { category: "Salary".into(), total: 500.0 }]);
    }

    #[test]
    fn balance_may_go_negative() {
        let expenses = table(Side::Expense, vec![record("Jan", "Rent", 900.0)]);
        let income = table(Side::Income, vec![record("Jan", "Salary", 500.0)]);
        let summary = summarize(&expenses, &income);
        assert_eq!(summary.balance, -400.0);
    }

    #[test]
    fn top_categories_sorted_descending_and_truncated() {
        let records = vec![
            record("Jan", "Food", 10.0),
            record("Jan", "Rent", 900.0),
            record("Feb", "Food", 30.0),
            record("Feb", "Transport", 50.0),
            record("Mar", "Leisure", 5.0),
        ];

        let top = Aggregator::top_categories(&records, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].category, "Rent");
        assert_eq!(top[1].category, "Transport");
        assert_eq!(top[2].category, "Food");
        assert_eq!(top[2].total, 40.0);

        let side_total = Aggregator::total(&records);
        let top_sum: f64 = top.iter().map(|c| c.total).sum();
        assert!(top_sum <= side_total);
    }

    #[test]
    fn ties_keep_first_encountered_category_first() {
        let records = vec![
            record("Jan", "Books", 50.0),
            record("Jan", "Games", 50.0),
            record("Jan", "Pets", 50.0),
        ];

        let top = Aggregator::top_categories(&records, 2);
        assert_eq!(top[0].category, "Books");
        assert_eq!(top[1].category, "Games");
    }

    #[test]
    fn zero_total_categories_get_no_rank() {
        let records = vec![record("Jan", "Unknown", 0.0), record("Jan", "Food", 10.0)];
        let top = Aggregator::top_categories(&records, 3);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].category, "Food");
    }

    #[test]
    fn summaries_are_deterministic() {
        let expenses = table(
            Side::Expense,
            vec![record("Jan", "Food", 12.5), record("Feb", "Rent", 800.0)],
        );
        let income = table(Side::Income, vec![record("Jan", "Salary", 1000.0)]);

        let first = summarize(&expenses, &income);
        let second = summarize(&expenses, &income);
        assert_eq!(first, second);
    }
}
