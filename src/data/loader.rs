//! Sheet Loader Module
//! Parses the spreadsheet CSV export with Polars and projects the fixed
//! column layout into the canonical raw table.

use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// Positions consumed out of the ≥13-column export.
pub const COLUMN_POSITIONS: [usize; 8] = [0, 2, 3, 4, 8, 10, 11, 12];

pub const EXPENSE_DATE: &str = "expense_date";
pub const EXPENSE_CATEGORY: &str = "expense_category";
pub const EXPENSE_DESCRIPTION: &str = "expense_description";
pub const EXPENSE_AMOUNT: &str = "expense_amount";
pub const INCOME_DATE: &str = "income_date";
pub const INCOME_CATEGORY: &str = "income_category";
pub const INCOME_DESCRIPTION: &str = "income_description";
pub const INCOME_AMOUNT: &str = "income_amount";

pub const CANONICAL_COLUMNS: [&str; 8] = [
    EXPENSE_DATE,
    EXPENSE_CATEGORY,
    EXPENSE_DESCRIPTION,
    EXPENSE_AMOUNT,
    INCOME_DATE,
    INCOME_CATEGORY,
    INCOME_DESCRIPTION,
    INCOME_AMOUNT,
];

/// Minimum width of the raw export.
const MIN_COLUMNS: usize = 13;

/// The export is read headerless, so the real header row and the possibly
/// duplicated header below it are both dropped as data rows.
const HEADER_ROWS: usize = 2;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Expected at least 13 columns, found {found}")]
    TooFewColumns { found: usize },
    #[error("No data rows after dropping header rows")]
    NoData,
}

/// Loads the raw export from fetched bytes or a local file.
pub struct SheetLoader;

impl SheetLoader {
    /// Parse an in-memory CSV export (the fetched spreadsheet).
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(false)
            .with_infer_schema_length(Some(100))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()?;

        Self::project(df)
    }

    /// Parse a local CSV file with the same layout as the export.
    pub fn from_csv_path(path: &Path) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_has_header(false)
            .with_infer_schema_length(Some(100))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Self::project(df)
    }

    /// Select the fixed column positions, rename to canonical names and drop
    /// the header rows.
    fn project(df: DataFrame) -> Result<DataFrame, LoaderError> {
        if df.width() < MIN_COLUMNS {
            return Err(LoaderError::TooFewColumns { found: df.width() });
        }

        let columns = df.get_columns();
        let mut projected = Vec::with_capacity(COLUMN_POSITIONS.len());
        for (&pos, &name) in COLUMN_POSITIONS.iter().zip(CANONICAL_COLUMNS.iter()) {
            let mut column = columns[pos].clone();
            column.rename(name.into());
            projected.push(column);
        }

        let df = DataFrame::new(projected)?;
        let df = df.slice(HEADER_ROWS as i64, df.height());
        if df.height() == 0 {
            return Err(LoaderError::NoData);
        }

        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Data,Saldo,Categoria,Descricao,Valor,a,b,c,Data,Saldo,Categoria,Descricao,Valor
Data,Saldo,Categoria,Descricao,Valor,a,b,c,Data,Saldo,Categoria,Descricao,Valor
05/01/2024,x,Food,Lunch,\"R$ 10,00\",a,b,c,05/01/2024,x,Salary,Pay,\"R$ 500,00\"
06/01/2024,x,Rent,Flat,\"R$ 90,00\",a,b,c,,,,,
";

    #[test]
    fn projects_and_renames_canonical_columns() {
        let df = SheetLoader::from_csv_bytes(SAMPLE_CSV.as_bytes()).unwrap();

        assert_eq!(df.width(), 8);
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, CANONICAL_COLUMNS.to_vec());

        let categories = df.column(EXPENSE_CATEGORY).unwrap();
        let series = categories.as_materialized_series();
        assert_eq!(series.str().unwrap().get(0), Some("Food"));
        assert_eq!(series.str().unwrap().get(1), Some("Rent"));
    }

    #[test]
    fn drops_header_and_duplicated_header_rows() {
        let df = SheetLoader::from_csv_bytes(SAMPLE_CSV.as_bytes()).unwrap();
        let dates = df.column(EXPENSE_DATE).unwrap();
        let series = dates.as_materialized_series();
        assert_eq!(series.str().unwrap().get(0), Some("05/01/2024"));
    }

    #[test]
    fn rejects_narrow_tables() {
        let csv = "a,b,c,d,e\n1,2,3,4,5\n1,2,3,4,5\n1,2,3,4,5\n";
        let err = SheetLoader::from_csv_bytes(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::TooFewColumns { found: 5 }));
    }

    #[test]
    fn rejects_header_only_tables() {
        let csv = "\
Data,Saldo,Categoria,Descricao,Valor,a,b,c,Data,Saldo,Categoria,Descricao,Valor
Data,Saldo,Categoria,Descricao,Valor,a,b,c,Data,Saldo,Categoria,Descricao,Valor
";
        let err = SheetLoader::from_csv_bytes(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoaderError::NoData));
    }
}
