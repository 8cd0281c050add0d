//! Running balance for exports that carry no balance column.

use crate::error::{Error, Result};
use crate::types::DebitCredit;
use rust_decimal::Decimal;

/// Balance accumulator threaded through one conversion pass.
///
/// Seeded with the caller's opening balance. Row 0 reports the seed as is;
/// every later row moves the balance by its amount and reports the result
/// rounded to cents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunningBalance {
    current: Decimal,
}

impl RunningBalance {
    /// Start a new pass at `opening`.
    pub fn new(opening: Decimal) -> Self {
        Self { current: opening }
    }

    /// The carried balance, unrounded.
    pub fn current(&self) -> Decimal {
        self.current
    }

    /// Apply the row at `index` and return its balance.
    ///
    /// Fails with [`Error::BalanceOverflow`] when the result no longer fits
    /// a [`Decimal`]; the carried balance is left untouched in that case.
    pub fn apply(&mut self, index: usize, direction: DebitCredit, amount: Decimal) -> Result<Decimal> {
        if index == 0 {
            return Ok(self.current);
        }

        let next = match direction {
            DebitCredit::Credit => self.current.checked_add(amount),
            DebitCredit::Debit => self.current.checked_sub(amount),
        };
        self.current = next.ok_or(Error::BalanceOverflow { row: index })?;

        Ok(self.current.round_dp(2))
    }

    /// Balance for a row that moves nothing.
    pub fn carried(&self, index: usize) -> Decimal {
        if index == 0 {
            self.current
        } else {
            self.current.round_dp(2)
        }
    }
}
