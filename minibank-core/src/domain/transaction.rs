//! Transaction domain model
//!
//! A transaction is a proposed money movement. Applying it runs exactly one
//! account primitive and records the transaction in the account's history
//! only when that primitive succeeds.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::account::Account;
use super::result::Result;

/// Kind tag shared by transactions and history entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("Deposit"),
            TransactionKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

/// A money movement against a single account
///
/// The amount is not validated on construction; the account primitives
/// reject non-positive amounts when the transaction is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount")]
pub enum Transaction {
    Deposit(Decimal),
    Withdrawal(Decimal),
}

impl Transaction {
    pub fn deposit(amount: Decimal) -> Self {
        Transaction::Deposit(amount)
    }

    pub fn withdrawal(amount: Decimal) -> Self {
        Transaction::Withdrawal(amount)
    }

    pub fn amount(&self) -> Decimal {
        match *self {
            Transaction::Deposit(amount) | Transaction::Withdrawal(amount) => amount,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Deposit(_) => TransactionKind::Deposit,
            Transaction::Withdrawal(_) => TransactionKind::Withdrawal,
        }
    }

    /// Apply to an account and record it in the account history
    ///
    /// On error the account is left untouched and nothing is recorded.
    pub(crate) fn apply(&self, account: &mut Account) -> Result<()> {
        match *self {
            Transaction::Deposit(amount) => account.credit(amount)?,
            Transaction::Withdrawal(amount) => account.debit(amount)?,
        }
        account.record(self.kind(), self.amount());
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::Error;
    use crate::domain::AccountNumber;

    fn account() -> Account {
        Account::new_current(AccountNumber(1), "0001", "12345678900")
    }

    #[test]
    fn test_deposit_records_history() {
        let mut account = account();
        Transaction::deposit(Decimal::from(1000)).apply(&mut account).unwrap();

        assert_eq!(account.balance(), Decimal::from(1000));
        assert_eq!(account.history().len(), 1);
        assert_eq!(account.history().entries()[0].kind, TransactionKind::Deposit);
    }

    #[test]
    fn test_rejected_withdrawal_is_not_recorded() {
        let mut account = account();
        let err = Transaction::withdrawal(Decimal::from(10))
            .apply(&mut account)
            .unwrap_err();

        assert!(matches!(err, Error::InsufficientFunds { .. }));
        assert!(account.history().is_empty());
    }

    #[test]
    fn test_accessors_and_display() {
        let tx = Transaction::withdrawal(Decimal::new(12550, 2));
        assert_eq!(tx.kind(), TransactionKind::Withdrawal);
        assert_eq!(tx.amount(), Decimal::new(12550, 2));
        assert_eq!(tx.to_string(), "Withdrawal(125.50)");
    }
}
