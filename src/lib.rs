//! GnuCash Converter Library
//!
//! Converts bank statement exports into a single canonical ledger CSV that
//! GnuCash can import.
//!
//! # Supported Formats
//!
//! - **Rabobank CSV** (`csv`): comma-delimited, balance column included
//! - **Rabobank TXT** (`txt`): comma-delimited, balance computed
//! - **ING** (`ing`): semicolon-delimited, balance computed
//!
//! # Features
//!
//! - Locale-aware amount parsing into exact decimals
//! - Running balance from a caller-supplied opening balance
//! - Ledger output with a fixed eight-column layout
//! - Use standard `Read` and `Write` traits for flexibility
//!
//! # Examples
//!
//! ## Converting an ING export
//!
//! ```no_run
//! use std::fs::File;
//! use gnucash_converter::conversion::{convert, ConvertOptions};
//! use gnucash_converter::strategy::Dialect;
//! use rust_decimal::Decimal;
//!
//! let input = File::open("ing.csv")?;
//! let output = File::create("gnucash.csv")?;
//!
//! let options = ConvertOptions::new("ing".parse::<Dialect>()?, Decimal::new(123_45, 2));
//! convert(input, output, &options)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod amount;
pub mod types;
pub mod balance;
pub mod strategy;
pub mod csv_format;
pub mod txt_format;
pub mod ing_format;
pub mod engine;
pub mod ledger_format;
pub mod conversion;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::{DebitCredit, Transaction, LEDGER_HEADING};
pub use strategy::{Dialect, FormatStrategy, UnknownFlagPolicy};
pub use conversion::{convert, ConvertOptions};
