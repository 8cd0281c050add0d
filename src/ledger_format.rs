//! Ledger import CSV writer.
//!
//! Writes the canonical eight-column file: a heading row followed by one
//! semicolon-delimited row per transaction.

use crate::error::Result;
use crate::types::{Transaction, LEDGER_HEADING};
use csv::{QuoteStyle, Writer, WriterBuilder};
use serde::Serialize;
use std::io::Write;

/// Field delimiter of the ledger file.
pub const LEDGER_DELIMITER: u8 = b';';

/// One ledger row as written to the import file. `None` cells stay empty.
#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Num")]
    num: Option<&'a str>,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Notes")]
    notes: &'a str,
    #[serde(rename = "Account")]
    account: Option<&'a str>,
    #[serde(rename = "Deposit")]
    deposit: Option<String>,
    #[serde(rename = "Withdrawal")]
    withdrawal: Option<String>,
    #[serde(rename = "Balance")]
    balance: String,
}

impl<'a> From<&'a Transaction> for LedgerRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            date: tx.date.format("%Y-%m-%d").to_string(),
            num: tx.num.as_deref(),
            description: &tx.description,
            notes: &tx.notes,
            account: tx.account.as_deref(),
            deposit: tx.deposit.map(|d| d.to_string()),
            withdrawal: tx.withdrawal.map(|w| w.to_string()),
            balance: tx.balance.to_string(),
        }
    }
}

/// Streams transactions into a ledger import file.
pub struct LedgerWriter<W: Write> {
    inner: Writer<W>,
    written: usize,
}

impl<W: Write> LedgerWriter<W> {
    /// Wrap `writer` and emit the heading row.
    ///
    /// # Examples
    ///
    /// ```
    /// use gnucash_converter::ledger_format::LedgerWriter;
    ///
    /// let mut out = Vec::new();
    /// LedgerWriter::new(&mut out)?.finish()?;
    /// assert_eq!(
    ///     String::from_utf8(out).unwrap(),
    ///     "Date;Num;Description;Notes;Account;Deposit;Withdrawal;Balance\n"
    /// );
    /// # Ok::<(), gnucash_converter::Error>(())
    /// ```
    pub fn new(writer: W) -> Result<Self> {
        // Heading written by hand so an empty export still gets one
        let mut inner = WriterBuilder::new()
            .delimiter(LEDGER_DELIMITER)
            .quote_style(QuoteStyle::Necessary)
            .has_headers(false)
            .from_writer(writer);
        inner.write_record(LEDGER_HEADING)?;
        Ok(Self { inner, written: 0 })
    }

    /// Append one transaction.
    pub fn write(&mut self, transaction: &Transaction) -> Result<()> {
        self.inner.serialize(LedgerRow::from(transaction))?;
        self.written += 1;
        Ok(())
    }

    /// Transactions written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered rows to the underlying writer.
    pub fn finish(mut self) -> Result<usize> {
        self.inner.flush()?;
        Ok(self.written)
    }
}

/// Print one transaction as a list of its ledger cells, for inspection.
pub fn print_transaction<W: Write>(writer: &mut W, transaction: &Transaction) -> Result<()> {
    writeln!(writer, "{:?}", transaction.as_record())?;
    Ok(())
}
