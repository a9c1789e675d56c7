//! Charts module - dashboard plots and static export

mod export;
mod plotter;

pub use export::export_summary_png;
pub use plotter::{ChartPlotter, EXPENSE_COLOR, INCOME_COLOR};
