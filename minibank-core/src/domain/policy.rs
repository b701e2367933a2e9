//! Withdrawal policies
//!
//! A policy narrows what the base ledger accepts. It is consulted before the
//! base debit rule and told about each successful withdrawal so it can track
//! its own counters.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Default cap on a single withdrawal
pub const DEFAULT_PER_WITHDRAWAL_LIMIT: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Default number of withdrawals allowed
pub const DEFAULT_DAILY_WITHDRAWAL_LIMIT: u32 = 3;

/// Limits applied to current accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalLimits {
    pub per_withdrawal: Decimal,
    pub daily_count: u32,
}

impl Default for WithdrawalLimits {
    fn default() -> Self {
        Self {
            per_withdrawal: DEFAULT_PER_WITHDRAWAL_LIMIT,
            daily_count: DEFAULT_DAILY_WITHDRAWAL_LIMIT,
        }
    }
}

/// Per-account withdrawal policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WithdrawalPolicy {
    /// Only the base ledger rules apply
    Unrestricted,
    /// Per-withdrawal amount cap plus a withdrawal count cap
    ///
    /// The counter never resets; "daily" is effectively the account lifetime.
    Capped {
        limits: WithdrawalLimits,
        withdrawals_made_today: u32,
    },
}

impl WithdrawalPolicy {
    pub fn capped(limits: WithdrawalLimits) -> Self {
        WithdrawalPolicy::Capped {
            limits,
            withdrawals_made_today: 0,
        }
    }

    /// Check a withdrawal before the base ledger sees it
    pub fn check(&self, amount: Decimal) -> Result<()> {
        match self {
            WithdrawalPolicy::Unrestricted => Ok(()),
            WithdrawalPolicy::Capped {
                limits,
                withdrawals_made_today,
            } => {
                if amount > limits.per_withdrawal {
                    return Err(Error::ExceedsPerTransactionLimit {
                        limit: limits.per_withdrawal,
                        requested: amount,
                    });
                }
                if *withdrawals_made_today >= limits.daily_count {
                    return Err(Error::DailyWithdrawalLimitReached {
                        limit: limits.daily_count,
                    });
                }
                Ok(())
            }
        }
    }

    /// Note a withdrawal the base ledger accepted
    pub(crate) fn record_withdrawal(&mut self) {
        if let WithdrawalPolicy::Capped {
            withdrawals_made_today,
            ..
        } = self
        {
            *withdrawals_made_today += 1;
        }
    }

    pub fn withdrawals_made_today(&self) -> u32 {
        match self {
            WithdrawalPolicy::Unrestricted => 0,
            WithdrawalPolicy::Capped {
                withdrawals_made_today,
                ..
            } => *withdrawals_made_today,
        }
    }
}
