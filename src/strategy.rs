//! Per-dialect row conversion.
//!
//! Each supported bank export has its own [`FormatStrategy`]. A strategy
//! turns one raw row into at most one [`Transaction`]; exports without a
//! balance column move the [`RunningBalance`] handed to them.

use crate::amount::AmountParser;
use crate::balance::RunningBalance;
use crate::csv_format::RabobankCsv;
use crate::error::{Error, Result};
use crate::ing_format::Ing;
use crate::txt_format::RabobankTxt;
use crate::types::{DebitCredit, Transaction};
use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

/// Converts raw export rows into ledger transactions.
pub trait FormatStrategy {
    /// Convert the row at `index` (0-based, header included).
    ///
    /// Returns `Ok(None)` for rows that produce no transaction, such as a
    /// header.
    fn parse_row(
        &self,
        row: &StringRecord,
        index: usize,
        balance: &mut RunningBalance,
    ) -> Result<Option<Transaction>>;
}

/// What to do with a credit/debit indicator outside the known set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFlagPolicy {
    /// Emit the row with neither deposit nor withdrawal, keeping the carried balance.
    #[default]
    PassThrough,
    /// Fail the conversion with [`Error::UnrecognizedFlag`].
    Reject,
}

/// Supported bank export dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Rabobank CSV export with a balance column.
    RabobankCsv,
    /// Rabobank text export without a balance column.
    RabobankTxt,
    /// ING semicolon export without a balance column.
    Ing,
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" | "rabobank (csv)" | "rabobank-csv" => Ok(Dialect::RabobankCsv),
            "txt" | "rabobank (txt)" | "rabobank-txt" => Ok(Dialect::RabobankTxt),
            "ing" => Ok(Dialect::Ing),
            _ => Err(Error::UnrecognizedFormat(s.to_string())),
        }
    }
}

impl Dialect {
    /// Field delimiter of the raw export.
    pub fn delimiter(&self) -> u8 {
        match self {
            Dialect::RabobankCsv | Dialect::RabobankTxt => b',',
            Dialect::Ing => b';',
        }
    }

    /// Whether row 0 is a column heading.
    pub fn has_header(&self) -> bool {
        match self {
            Dialect::RabobankCsv | Dialect::Ing => true,
            Dialect::RabobankTxt => false,
        }
    }

    /// Build the row converter for this dialect.
    pub fn strategy(&self, parser: AmountParser, policy: UnknownFlagPolicy) -> Box<dyn FormatStrategy> {
        match self {
            Dialect::RabobankCsv => Box::new(RabobankCsv::new(parser)),
            Dialect::RabobankTxt => Box::new(RabobankTxt::new(parser, policy)),
            Dialect::Ing => Box::new(Ing::new(parser, policy)),
        }
    }
}

/// Fetch column `idx`, failing with the column's name when the row is short.
pub(crate) fn field<'r>(
    row: &'r StringRecord,
    idx: usize,
    index: usize,
    name: &'static str,
) -> Result<&'r str> {
    row.get(idx).ok_or(Error::MissingField { row: index, field: name })
}

/// Parse a date field with a fixed chrono layout.
pub(crate) fn parse_date(value: &str, layout: &str, index: usize) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), layout).map_err(|_| Error::MalformedDate {
        row: index,
        value: value.to_string(),
    })
}

/// Book a flagged amount and set the row balance from the running balance.
///
/// `direction` is `None` when `flag` is outside the dialect's known set.
pub(crate) fn settle(
    transaction: &mut Transaction,
    direction: Option<DebitCredit>,
    flag: &str,
    amount: Decimal,
    index: usize,
    balance: &mut RunningBalance,
    policy: UnknownFlagPolicy,
) -> Result<()> {
    match (direction, policy) {
        (Some(direction), _) => {
            transaction.book(direction, amount);
            transaction.balance = balance.apply(index, direction, amount)?;
        }
        (None, UnknownFlagPolicy::PassThrough) => {
            warn!(row = index, flag, "Unrecognized credit/debit flag, balance left unchanged");
            transaction.balance = balance.carried(index);
        }
        (None, UnknownFlagPolicy::Reject) => {
            return Err(Error::UnrecognizedFlag {
                row: index,
                value: flag.to_string(),
            });
        }
    }
    Ok(())
}

/// Space-join the trimmed, non-empty values of the given columns.
///
/// Columns past the end of the row count as empty.
pub(crate) fn join_fields(row: &StringRecord, columns: &[usize]) -> String {
    columns
        .iter()
        .filter_map(|&i| row.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("csv".parse::<Dialect>().unwrap(), Dialect::RabobankCsv);
        assert_eq!("Rabobank (CSV)".parse::<Dialect>().unwrap(), Dialect::RabobankCsv);
        assert_eq!("txt".parse::<Dialect>().unwrap(), Dialect::RabobankTxt);
        assert_eq!("rabobank (txt)".parse::<Dialect>().unwrap(), Dialect::RabobankTxt);
        assert_eq!(" ING ".parse::<Dialect>().unwrap(), Dialect::Ing);
    }

    #[test]
    fn test_dialect_unrecognized() {
        let err = "abn".parse::<Dialect>().unwrap_err();
        assert!(matches!(err, Error::UnrecognizedFormat(ref s) if s == "abn"));
    }

    #[test]
    fn test_dialect_layout() {
        assert_eq!(Dialect::Ing.delimiter(), b';');
        assert_eq!(Dialect::RabobankTxt.delimiter(), b',');
        assert!(Dialect::RabobankCsv.has_header());
        assert!(!Dialect::RabobankTxt.has_header());
    }

    #[test]
    fn test_join_fields_skips_blanks() {
        let row = StringRecord::from(vec!["  a ", "", "   ", "b", "c  "]);
        assert_eq!(join_fields(&row, &[0, 1, 2, 3, 4, 9]), "a b c");
        assert_eq!(join_fields(&row, &[1, 2]), "");
    }

    #[test]
    fn test_parse_date_malformed() {
        let err = parse_date("2024-13-01", "%Y-%m-%d", 3).unwrap_err();
        assert!(matches!(err, Error::MalformedDate { row: 3, .. }));
    }
}
