//! Stats module - totals, top categories and timelines

mod aggregator;
mod timeline;

pub use aggregator::{Aggregator, CategoryTotal, LedgerSummary, SideSummary, DEFAULT_TOP_N};
pub use timeline::{parse_date_label, timeline, TimelinePoint};
