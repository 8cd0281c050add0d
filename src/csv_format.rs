//! Rabobank CSV export.
//!
//! Comma-delimited, one heading row, signed amounts and a balance column
//! after every booking. Amounts use a comma as decimal mark.

use crate::amount::{AmountParser, DecimalSeparator};
use crate::balance::RunningBalance;
use crate::error::Result;
use crate::strategy::{field, join_fields, parse_date, FormatStrategy};
use crate::types::{DebitCredit, Transaction};
use csv::StringRecord;
use rust_decimal::Decimal;
use tracing::debug;

const ACCOUNT: usize = 0;
const SEQUENCE_NUMBER: usize = 3;
const DATE: usize = 4;
const AMOUNT: usize = 6;
const BALANCE: usize = 7;
const COUNTERPARTY_NAME: usize = 9;

/// Columns gathered into the notes, in output order: counterparty IBAN,
/// BIC, counterparty name, description lines 1-3, transaction code,
/// transaction reference, mandate reference, creditor ID, payment reference.
const NOTE_COLUMNS: [usize; 11] = [8, 12, 9, 19, 20, 21, 13, 15, 16, 17, 18];

/// Row converter for the Rabobank CSV export.
#[derive(Debug, Clone)]
pub struct RabobankCsv {
    parser: AmountParser,
}

impl RabobankCsv {
    /// Create a converter that reads amounts with `parser`.
    pub fn new(parser: AmountParser) -> Self {
        Self { parser }
    }
}

impl FormatStrategy for RabobankCsv {
    fn parse_row(
        &self,
        row: &StringRecord,
        index: usize,
        _balance: &mut RunningBalance,
    ) -> Result<Option<Transaction>> {
        if index == 0 {
            debug!("Skipping Rabobank CSV heading");
            return Ok(None);
        }

        let date = parse_date(field(row, DATE, index, "Datum")?, "%Y-%m-%d", index)?;
        let amount = self
            .parser
            .parse(field(row, AMOUNT, index, "Bedrag")?, DecimalSeparator::Comma)?;
        let balance = self.parser.parse(
            field(row, BALANCE, index, "Saldo na trn")?,
            DecimalSeparator::Comma,
        )?;

        let mut transaction = Transaction::new(date, balance);

        let direction = if amount > Decimal::ZERO {
            DebitCredit::Credit
        } else {
            DebitCredit::Debit
        };
        transaction.book(direction, amount.abs());

        let num = field(row, SEQUENCE_NUMBER, index, "Volgnr")?.trim();
        transaction.num = (!num.is_empty()).then(|| num.to_string());

        let account = field(row, ACCOUNT, index, "IBAN/BBAN")?.trim();
        transaction.account = (!account.is_empty()).then(|| account.to_string());

        transaction.description = field(row, COUNTERPARTY_NAME, index, "Naam tegenpartij")?
            .trim()
            .to_string();
        transaction.notes = join_fields(row, &NOTE_COLUMNS);

        Ok(Some(transaction))
    }
}
