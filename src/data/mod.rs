//! Data module - fetching, loading, cleaning and splitting the export

mod cleaner;
mod fetcher;
mod loader;
mod splitter;

pub use cleaner::{clean_amount_text, AmountCleaner, CleanError, CleanReport};
pub use fetcher::{FetchError, SheetFetcher};
pub use loader::{LoaderError, SheetLoader};
pub use splitter::{split, DropPolicy, LedgerTable, Record, Side, SplitError};
