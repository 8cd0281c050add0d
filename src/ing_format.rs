//! ING export.
//!
//! Semicolon-delimited with a heading row. Direction comes from an
//! `Af`/`Bij` column and the balance is computed like the Rabobank text
//! export.

use crate::amount::{AmountParser, DecimalSeparator};
use crate::balance::RunningBalance;
use crate::error::Result;
use crate::strategy::{field, parse_date, settle, FormatStrategy, UnknownFlagPolicy};
use crate::types::{DebitCredit, Transaction};
use csv::StringRecord;
use rust_decimal::Decimal;
use tracing::debug;

const DATE: usize = 1;
const FLAG: usize = 6;
const AMOUNT: usize = 7;

const DESCRIPTION_COLUMNS: [usize; 6] = [2, 4, 9, 10, 11, 12];

/// Row converter for the ING export.
#[derive(Debug, Clone)]
pub struct Ing {
    parser: AmountParser,
    policy: UnknownFlagPolicy,
}

impl Ing {
    /// Create a converter that reads amounts with `parser` and handles
    /// unknown credit/debit flags according to `policy`.
    pub fn new(parser: AmountParser, policy: UnknownFlagPolicy) -> Self {
        Self { parser, policy }
    }
}

fn direction(flag: &str) -> Option<DebitCredit> {
    match flag {
        "Bij" => Some(DebitCredit::Credit),
        "Af" => Some(DebitCredit::Debit),
        _ => None,
    }
}

/// Glue the trimmed description columns together without a separator.
fn describe(row: &StringRecord) -> String {
    DESCRIPTION_COLUMNS
        .iter()
        .filter_map(|&i| row.get(i))
        .map(str::trim)
        .collect()
}

impl FormatStrategy for Ing {
    fn parse_row(
        &self,
        row: &StringRecord,
        index: usize,
        balance: &mut RunningBalance,
    ) -> Result<Option<Transaction>> {
        if index == 0 {
            debug!("Skipping ING heading");
            return Ok(None);
        }

        let date = parse_date(field(row, DATE, index, "Datum")?, "%Y%m%d", index)?;
        let amount = self
            .parser
            .parse(field(row, AMOUNT, index, "Bedrag (EUR)")?, DecimalSeparator::Comma)?;
        let flag = field(row, FLAG, index, "Af Bij")?.trim();

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
        transaction.description = describe(row);

        Ok(Some(transaction))
    }
}
