//! End-to-end conversion of a bank export into a ledger import file.

use crate::amount::{AmountParser, DecimalSeparator};
use crate::engine::ConversionEngine;
use crate::error::Result;
use crate::ledger_format::{print_transaction, LedgerWriter};
use crate::strategy::{Dialect, UnknownFlagPolicy};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::io::{Read, Write};
use tracing::{debug, info};

/// Everything the caller decides about one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Layout of the input export.
    pub dialect: Dialect,
    /// Balance before the first booking.
    pub initial_balance: Decimal,
    /// Expected balance after the last booking.
    pub final_balance: Option<Decimal>,
    /// Decimal separator of the active locale.
    pub locale_separator: DecimalSeparator,
    /// Handling of credit/debit flags outside the dialect's known set.
    pub unknown_flag: UnknownFlagPolicy,
    /// Print each transaction's cells instead of writing a ledger file.
    pub inspect: bool,
}

impl ConvertOptions {
    /// Options with defaults for everything but the dialect and opening balance.
    pub fn new(dialect: Dialect, initial_balance: Decimal) -> Self {
        Self {
            dialect,
            initial_balance,
            final_balance: None,
            locale_separator: DecimalSeparator::default(),
            unknown_flag: UnknownFlagPolicy::default(),
            inspect: false,
        }
    }
}

/// Convert the export read from `input` and write the result to `output`.
///
/// Returns the number of transactions emitted. The export is fully
/// converted before anything is written, so a bad row leaves `output`
/// untouched.
///
/// # Examples
///
/// ```
/// use gnucash_converter::conversion::{convert, ConvertOptions};
/// use gnucash_converter::strategy::Dialect;
/// use rust_decimal::Decimal;
///
/// let export = "NL11RABO0101010101,EUR,20240220,C,\"10,00\"\n";
/// let mut ledger = Vec::new();
///
/// let options = ConvertOptions::new(Dialect::RabobankTxt, Decimal::new(5000, 2));
/// let count = convert(export.as_bytes(), &mut ledger, &options)?;
/// assert_eq!(count, 1);
/// # Ok::<(), gnucash_converter::Error>(())
/// ```
pub fn convert<R: Read, W: Write>(input: R, mut output: W, options: &ConvertOptions) -> Result<usize> {
    let reader = ReaderBuilder::new()
        .delimiter(options.dialect.delimiter())
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let parser = AmountParser::new(options.locale_separator);
    let strategy = options.dialect.strategy(parser, options.unknown_flag);

    debug!(dialect = ?options.dialect, locale = ?options.locale_separator, "Starting conversion");

    let mut engine = ConversionEngine::new(strategy, reader.into_records());
    engine.set_initial_balance(options.initial_balance);
    if let Some(final_balance) = options.final_balance {
        engine.set_final_balance(final_balance);
    }
    engine.run()?;

    let count = if options.inspect {
        let mut count = 0;
        while engine.has_next() {
            print_transaction(&mut output, &engine.next_transaction()?)?;
            count += 1;
        }
        output.flush()?;
        count
    } else {
        let mut writer = LedgerWriter::new(output)?;
        while engine.has_next() {
            writer.write(&engine.next_transaction()?)?;
        }
        writer.finish()?
    };

    info!(dialect = ?options.dialect, transactions = count, "Converted bank export");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_options_defaults() {
        let options = ConvertOptions::new(Dialect::Ing, Decimal::TEN);
        assert_eq!(options.initial_balance, Decimal::TEN);
        assert_eq!(options.final_balance, None);
        assert_eq!(options.locale_separator, DecimalSeparator::Point);
        assert_eq!(options.unknown_flag, UnknownFlagPolicy::PassThrough);
        assert!(!options.inspect);
    }

    #[test]
    fn test_convert_txt() {
        let export = "\
NL11RABO0101010101,EUR,20240220,C,\"10,00\",NL22,J. Jansen
NL11RABO0101010101,EUR,20240221,D,\"30,00\",NL33,Huur
";
        let mut out = Vec::new();
        let options = ConvertOptions::new(Dialect::RabobankTxt, Decimal::new(10000, 2));
        assert_eq!(convert(export.as_bytes(), &mut out, &options).unwrap(), 2);

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Date;Num;Description;Notes;Account;Deposit;Withdrawal;Balance\n\
             2024-02-20;;NL22 J. Jansen;;;10.00;;100.00\n\
             2024-02-21;;NL33 Huur;;;;30.00;70.00\n"
        );
    }

    #[test]
    fn test_inspect_mode() {
        let export = "NL11RABO0101010101,EUR,20240220,D,\"1,50\"\n";
        let mut out = Vec::new();
        let mut options = ConvertOptions::new(Dialect::RabobankTxt, Decimal::ONE);
        options.inspect = true;
        convert(export.as_bytes(), &mut out, &options).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[\"2024-02-20\", \"\", \"\", \"\", \"\", \"\", \"1.50\", \"1\"]\n"
        );
    }

    #[test]
    fn test_bad_row_writes_nothing() {
        let export = "\
NL11RABO0101010101,EUR,20240220,C,\"10,00\"
NL11RABO0101010101,EUR,2024-02-21,D,\"30,00\"
";
        let mut out = Vec::new();
        let options = ConvertOptions::new(Dialect::RabobankTxt, Decimal::ZERO);
        let err = convert(export.as_bytes(), &mut out, &options).unwrap_err();
        assert!(matches!(err, Error::MalformedDate { row: 1, .. }));
        assert!(out.is_empty());
    }
}
