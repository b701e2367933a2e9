//! Account domain model

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::history::History;
use super::policy::{WithdrawalLimits, WithdrawalPolicy};
use super::result::{Error, Result};
use super::transaction::TransactionKind;

/// Default branch identifier for new accounts
pub const DEFAULT_BRANCH: &str = "0001";

/// Sequential account number assigned by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(pub u32);

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A ledger account: balance, history and the policy that narrows withdrawals
///
/// Balance is only ever changed by `credit` and `debit`, which are crate-private;
/// callers outside the core go through `Client::initiate`.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    number: AccountNumber,
    branch: String,
    /// Identifier of the owning client
    owner_id: String,
    balance: Decimal,
    history: History,
    policy: WithdrawalPolicy,
    opened_at: DateTime<Utc>,
}

impl Account {
    /// Open an account with an arbitrary withdrawal policy
    pub fn with_policy(
        number: AccountNumber,
        branch: impl Into<String>,
        owner_id: impl Into<String>,
        policy: WithdrawalPolicy,
    ) -> Self {
        Self {
            number,
            branch: branch.into(),
            owner_id: owner_id.into(),
            balance: Decimal::ZERO,
            history: History::new(),
            policy,
            opened_at: Utc::now(),
        }
    }

    /// Open a current account with default limits
    pub fn new_current(
        number: AccountNumber,
        branch: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self::current_with_limits(number, branch, owner_id, WithdrawalLimits::default())
    }

    /// Open a current account with explicit limits
    pub fn current_with_limits(
        number: AccountNumber,
        branch: impl Into<String>,
        owner_id: impl Into<String>,
        limits: WithdrawalLimits,
    ) -> Self {
        Self::with_policy(number, branch, owner_id, WithdrawalPolicy::capped(limits))
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn withdrawals_made_today(&self) -> u32 {
        self.policy.withdrawals_made_today()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Add funds
    pub(crate) fn credit(&mut self, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount { amount });
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(Error::BalanceOverflow { amount })?;
        Ok(())
    }

    /// Remove funds, subject to the account's withdrawal policy
    pub(crate) fn debit(&mut self, amount: Decimal) -> Result<()> {
        self.policy.check(amount)?;
        self.debit_base(amount)?;
        self.policy.record_withdrawal();
        Ok(())
    }

    /// Base ledger rule: positive amount, never below zero
    fn debit_base(&mut self, amount: Decimal) -> Result<()> {
        if amount > self.balance {
            return Err(Error::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount { amount });
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(Error::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            })?;
        Ok(())
    }

    pub(crate) fn record(&mut self, kind: TransactionKind, amount: Decimal) {
        self.history.append(kind, amount);
    }
}
