//! Error types for the gnucash-converter library.

use std::io;
use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a bank export.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error occurred during read or write operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing CSV rows.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// The bank format identifier matches none of the known dialects.
    #[error("Unrecognized bank format: {0}")]
    UnrecognizedFormat(String),

    /// A date field does not follow the dialect's layout.
    #[error("Malformed date in row {row}: {value:?}")]
    MalformedDate { row: usize, value: String },

    /// An amount field is not a valid numeric literal.
    #[error("Malformed amount: {0:?}")]
    MalformedAmount(String),

    /// A credit/debit indicator outside the dialect's known set.
    #[error("Unrecognized credit/debit flag in row {row}: {value:?}")]
    UnrecognizedFlag { row: usize, value: String },

    /// The row is too short to contain a required field.
    #[error("Missing field {field} in row {row}")]
    MissingField { row: usize, field: &'static str },

    /// The running balance left the representable decimal range.
    #[error("Balance overflow in row {row}")]
    BalanceOverflow { row: usize },

    /// Decimal separator other than ',' or '.'.
    #[error("Invalid decimal separator: {0:?}")]
    InvalidSeparator(char),

    /// Engine used out of order.
    #[error("Conversion error: {0}")]
    ConversionError(String),
}
