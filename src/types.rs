//! Canonical ledger record shared by every dialect.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Column heading of the ledger import file, in output order.
pub const LEDGER_HEADING: [&str; 8] = [
    "Date",
    "Num",
    "Description",
    "Notes",
    "Account",
    "Deposit",
    "Withdrawal",
    "Balance",
];

/// One normalized ledger transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Booking date.
    pub date: NaiveDate,

    /// External sequence or reference number.
    pub num: Option<String>,

    /// Counterparty or summary text.
    pub description: String,

    /// Secondary descriptive fields joined together; empty when none had content.
    pub notes: String,

    /// Own account identifier.
    pub account: Option<String>,

    /// Amount credited.
    pub deposit: Option<Decimal>,

    /// Amount debited.
    pub withdrawal: Option<Decimal>,

    /// Account balance right after this transaction.
    pub balance: Decimal,
}

impl Transaction {
    /// Create a transaction with only a date and balance set.
    pub fn new(date: NaiveDate, balance: Decimal) -> Self {
        Self {
            date,
            num: None,
            description: String::new(),
            notes: String::new(),
            account: None,
            deposit: None,
            withdrawal: None,
            balance,
        }
    }

    /// Book `amount` on the side given by `direction`.
    ///
    /// Clears the opposite side so a transaction never carries both.
    pub fn book(&mut self, direction: DebitCredit, amount: Decimal) {
        match direction {
            DebitCredit::Credit => {
                self.deposit = Some(amount);
                self.withdrawal = None;
            }
            DebitCredit::Debit => {
                self.withdrawal = Some(amount);
                self.deposit = None;
            }
        }
    }

    /// The eight ledger cells in [`LEDGER_HEADING`] order, for inspection
    /// output.
    ///
    /// Absent values render as empty cells.
    pub fn as_record(&self) -> [String; 8] {
        [
            self.date.format("%Y-%m-%d").to_string(),
            self.num.clone().unwrap_or_default(),
            self.description.clone(),
            self.notes.clone(),
            self.account.clone().unwrap_or_default(),
            self.deposit.map(|d| d.to_string()).unwrap_or_default(),
            self.withdrawal.map(|w| w.to_string()).unwrap_or_default(),
            self.balance.to_string(),
        ]
    }
}

/// Debit/Credit indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitCredit {
    /// Money leaving the account.
    Debit,
    /// Money entering the account.
    Credit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_as_record_order() {
        let mut tx = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            Decimal::from_str("107.34").unwrap(),
        );
        tx.num = Some("000042".into());
        tx.description = "Albert Heijn".into();
        tx.notes = "NL01RABO0123456789 groceries".into();
        tx.account = Some("NL99RABO0987654321".into());
        tx.book(DebitCredit::Debit, Decimal::from_str("5.00").unwrap());

        assert_eq!(
            tx.as_record(),
            [
                "2024-03-09",
                "000042",
                "Albert Heijn",
                "NL01RABO0123456789 groceries",
                "NL99RABO0987654321",
                "",
                "5.00",
                "107.34",
            ]
            .map(String::from)
        );
    }

    #[test]
    fn test_book_sets_one_side() {
        let mut tx = Transaction::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), Decimal::ZERO);
        tx.book(DebitCredit::Debit, Decimal::ONE);
        tx.book(DebitCredit::Credit, Decimal::TEN);
        assert_eq!(tx.deposit, Some(Decimal::TEN));
        assert_eq!(tx.withdrawal, None);
    }
}
