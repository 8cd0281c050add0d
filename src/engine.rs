//! Drives a [`FormatStrategy`] over a row source.
//!
//! The engine reads every row once, in order, and buffers the resulting
//! transactions. Nothing is exposed until the whole source converted
//! cleanly; afterwards the buffer is read through a forward-only cursor.

use crate::balance::RunningBalance;
use crate::error::{Error, Result};
use crate::strategy::FormatStrategy;
use crate::types::Transaction;
use csv::StringRecord;
use rust_decimal::Decimal;
use tracing::debug;

/// One-shot conversion of a row source into ledger transactions.
///
/// # Examples
///
/// ```
/// use csv::StringRecord;
/// use gnucash_converter::amount::AmountParser;
/// use gnucash_converter::engine::ConversionEngine;
/// use gnucash_converter::strategy::{Dialect, UnknownFlagPolicy};
/// use rust_decimal::Decimal;
///
/// let rows = vec![Ok::<_, gnucash_converter::Error>(StringRecord::from(vec![
///     "NL11RABO0101010101", "EUR", "20240220", "C", "10,00",
/// ]))];
/// let strategy = Dialect::RabobankTxt.strategy(AmountParser::default(), UnknownFlagPolicy::default());
///
/// let mut engine = ConversionEngine::new(strategy, rows.into_iter());
/// engine.set_initial_balance(Decimal::new(10000, 2));
/// engine.run()?;
///
/// while engine.has_next() {
///     let transaction = engine.next_transaction()?;
///     assert_eq!(transaction.balance.to_string(), "100.00");
/// }
/// # Ok::<(), gnucash_converter::Error>(())
/// ```
pub struct ConversionEngine<R> {
    strategy: Box<dyn FormatStrategy>,
    rows: Option<R>,
    initial_balance: Option<Decimal>,
    final_balance: Option<Decimal>,
    transactions: Vec<Transaction>,
    pointer: usize,
}

impl<R, E> ConversionEngine<R>
where
    R: Iterator<Item = std::result::Result<StringRecord, E>>,
    E: Into<Error>,
{
    /// Create an engine over `rows` using `strategy`.
    pub fn new(strategy: Box<dyn FormatStrategy>, rows: R) -> Self {
        Self {
            strategy,
            rows: Some(rows),
            initial_balance: None,
            final_balance: None,
            transactions: Vec::new(),
            pointer: 0,
        }
    }

    /// Opening balance seeding the running balance.
    pub fn set_initial_balance(&mut self, balance: Decimal) {
        self.initial_balance = Some(balance);
    }

    /// Expected closing balance. Recorded and logged, never checked.
    pub fn set_final_balance(&mut self, balance: Decimal) {
        self.final_balance = Some(balance);
    }

    /// Convert every row of the source.
    ///
    /// Fails on the first bad row; in that case no transaction becomes
    /// readable. Can only run once.
    pub fn run(&mut self) -> Result<()> {
        let opening = self
            .initial_balance
            .ok_or_else(|| Error::ConversionError("initial balance not set".to_string()))?;
        let rows = self
            .rows
            .take()
            .ok_or_else(|| Error::ConversionError("row source already consumed".to_string()))?;

        let mut balance = RunningBalance::new(opening);
        let mut transactions = Vec::new();

        for (index, row) in rows.enumerate() {
            let row = row.map_err(Into::into)?;
            if let Some(transaction) = self.strategy.parse_row(&row, index, &mut balance)? {
                transactions.push(transaction);
            }
        }

        debug!(
            count = transactions.len(),
            closing = ?transactions.last().map(|t| t.balance),
            expected = ?self.final_balance,
            "Conversion pass finished; closing balance is not verified"
        );

        self.transactions = transactions;
        self.pointer = 0;
        Ok(())
    }

    /// Whether another transaction can be read.
    pub fn has_next(&self) -> bool {
        self.pointer < self.transactions.len()
    }

    /// Read the next transaction and advance the cursor.
    pub fn next_transaction(&mut self) -> Result<Transaction> {
        let transaction = self
            .transactions
            .get(self.pointer)
            .cloned()
            .ok_or_else(|| Error::ConversionError("read past the last transaction".to_string()))?;
        self.pointer += 1;
        Ok(transaction)
    }

    /// Number of buffered transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether no transactions are buffered.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
