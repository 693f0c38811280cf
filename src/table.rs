//! Tabular data model + CSV ingestion
//!
//! Cells are kept as strings for display; the x/y columns are parsed
//! to numbers on demand when glyphs are built.

use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read CSV: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] csv::Error),
}

/// An in-memory rectangular table of named columns. Row identity is
/// the load-order index; indices are never reused or reassigned while
/// the table is loaded.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Load a CSV file with a header row.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let file = std::fs::File::open(path.as_ref())?;
        let table = Self::from_csv_reader(file)?;
        info!(
            "Loaded {:?}: {} columns, {} rows",
            path.as_ref(),
            table.columns.len(),
            table.rows.len()
        );
        Ok(table)
    }

    /// Parse CSV from any reader; the first record is the header.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

        let columns: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// A single cell as text.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// A cell parsed as a number, if it is one.
    pub fn numeric_cell(&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row, col)?.trim().parse().ok()
    }

    /// All cells of a named column, in row order.
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    /// One full row of cells.
    pub fn row(&self, idx: usize) -> Option<&[String]> {
        self.rows.get(idx).map(Vec::as_slice)
    }
}
