//! Rabobank text export.
//!
//! Comma-delimited with no heading row. Amounts are unsigned and carry a
//! separate `C`/`D` flag; there is no balance column, so the balance is
//! computed from the opening balance.

use crate::amount::{AmountParser, DecimalSeparator};
use crate::balance::RunningBalance;
use crate::error::Result;
use crate::strategy::{field, join_fields, parse_date, settle, FormatStrategy, UnknownFlagPolicy};
use crate::types::{DebitCredit, Transaction};
use csv::StringRecord;
use rust_decimal::Decimal;

// The interest date in column 7 is less accurate than the booking date.
const DATE: usize = 2;
const FLAG: usize = 3;
const AMOUNT: usize = 4;

const DESCRIPTION_COLUMNS: [usize; 11] = [5, 6, 10, 11, 12, 13, 14, 15, 16, 17, 18];

/// Row converter for the Rabobank text export.
#[derive(Debug, Clone)]
pub struct RabobankTxt {
    parser: AmountParser,
    policy: UnknownFlagPolicy,
}

impl RabobankTxt {
    /// Create a converter that reads amounts with `parser` and handles
    /// unknown credit/debit flags according to `policy`.
    pub fn new(parser: AmountParser, policy: UnknownFlagPolicy) -> Self {
        Self { parser, policy }
    }
}

fn direction(flag: &str) -> Option<DebitCredit> {
    match flag {
        "C" => Some(DebitCredit::Credit),
        "D" => Some(DebitCredit::Debit),
        _ => None,
    }
}

impl FormatStrategy for RabobankTxt {
    fn parse_row(
        &self,
        row: &StringRecord,
        index: usize,
        balance: &mut RunningBalance,
    ) -> Result<Option<Transaction>> {
        let date = parse_date(field(row, DATE, index, "boekdatum")?, "%Y%m%d", index)?;
        let amount = self
            .parser
            .parse(field(row, AMOUNT, index, "bedrag")?, DecimalSeparator::Comma)?;
        let flag = field(row, FLAG, index, "credit/debet")?.trim();

        let mut transaction = Transaction::new(date, Decimal::ZERO);
        settle(
            &mut transaction,
            direction(flag),
            flag,
            amount,
            index,
            balance,
            self.policy,
        )?;
        transaction.description = join_fields(row, &DESCRIPTION_COLUMNS);

        Ok(Some(transaction))
    }
}
