//! Minibank Core - ledger logic for a minimal personal bank
//!
//! - **domain**: clients, accounts, transactions, history and withdrawal policies
//! - **services**: the client/account registry, event logging, demo data
//! - **config**: bank settings loaded from the data directory
//!
//! Every balance change goes through `Client::initiate`, which applies a
//! `Transaction` to an `Account` and records it in the account history only
//! when the account accepts it.

pub mod config;
pub mod domain;
pub mod services;

use std::path::{Path, PathBuf};

use anyhow::Result;

use config::Config;
use services::Bank;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{
    Account, AccountNumber, Client, HistoryEntry, NewClient, Transaction, TransactionKind,
    WithdrawalLimits, WithdrawalPolicy,
};
pub use services::{
    AccountSummary, EntryPoint, LogEvent, LoggingService, Receipt, Statement,
};

/// Main context for one program run
///
/// Holds the effective configuration and the bank registry. Nothing here is
/// global: the shell owns the context and passes it around by reference.
pub struct MinibankContext {
    pub config: Config,
    pub bank: Bank,
    data_dir: PathBuf,
}

impl MinibankContext {
    /// Load configuration from `data_dir` and start with an empty bank
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let bank = Bank::from_config(&config);
        Ok(Self {
            config,
            bank,
            data_dir: data_dir.to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
