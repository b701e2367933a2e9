//! Result and error types for the core library

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// The first block of variants are expected business outcomes: every one is
/// returned to the caller as a value and each renders one distinct message.
/// The rest are faults from the config and logging layers.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Operation failed! The amount {amount} is invalid.")]
    InvalidAmount { amount: Decimal },

    #[error("Operation failed! Insufficient funds (balance {balance}, requested {requested}).")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    #[error("Operation failed! The withdrawal of {requested} exceeds the limit of {limit:.2}.")]
    ExceedsPerTransactionLimit { limit: Decimal, requested: Decimal },

    #[error("Operation failed! Maximum number of withdrawals ({limit}) reached.")]
    DailyWithdrawalLimitReached { limit: u32 },

    #[error("Operation failed! A deposit of {amount} would exceed the maximum balance.")]
    BalanceOverflow { amount: Decimal },

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("A client with identifier {0} already exists")]
    DuplicateClientIdentifier(String),

    #[error("Client {0} has no account")]
    AccountNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidAmount { .. } => "invalid_amount",
            Error::InsufficientFunds { .. } => "insufficient_funds",
            Error::ExceedsPerTransactionLimit { .. } => "exceeds_per_transaction_limit",
            Error::DailyWithdrawalLimitReached { .. } => "daily_withdrawal_limit_reached",
            Error::BalanceOverflow { .. } => "balance_overflow",
            Error::ClientNotFound(_) => "client_not_found",
            Error::DuplicateClientIdentifier(_) => "duplicate_client_identifier",
            Error::AccountNotFound(_) => "account_not_found",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
        }
    }

    /// True for expected business outcomes (rejected operations, failed lookups)
    pub fn is_business(&self) -> bool {
        !matches!(self, Error::Config(_) | Error::Io(_) | Error::Json(_))
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation outcome for machine-readable output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub code: Option<String>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    /// Create a failed result from an error
    pub fn fail(error: &Error) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            code: Some(error.code().to_string()),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(&e),
        }
    }
}
