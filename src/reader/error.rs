use crate::table::TableError;

/// Errors that can occur while loading a cycler export
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A cell could not be parsed as a number
    #[error("Invalid value {value:?} in column {column:?} at data row {row}")]
    InvalidValue {
        /// 1-based data row, not counting the header
        row: usize,
        /// Header name of the column
        column: String,
        /// Raw cell text
        value: String,
    },

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Parsed rows violate the sample table contract
    #[error("Table error: {0}")]
    TableError(#[from] TableError),

    /// No input files were left after selection
    #[error("No input files selected")]
    NoInputs,
}
