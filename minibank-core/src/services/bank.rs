//! Bank service - client and account registry
//!
//! Owns every client and account for one program run and exposes the
//! operations the shell calls: register, open, deposit, withdraw, statement
//! and listing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::Config;
use crate::domain::result::{Error, Result};
use crate::domain::{
    Account, AccountNumber, Client, HistoryEntry, NewClient, Transaction, TransactionKind,
    WithdrawalLimits,
};

/// Registry of clients and accounts
#[derive(Debug, Clone)]
pub struct Bank {
    branch: String,
    limits: WithdrawalLimits,
    clients: HashMap<String, Client>,
    /// Indexed by account number - 1
    accounts: Vec<Account>,
}

impl Default for Bank {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Bank {
    pub fn new(branch: impl Into<String>, limits: WithdrawalLimits) -> Self {
        Self {
            branch: branch.into(),
            limits,
            clients: HashMap::new(),
            accounts: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.branch_code.clone(), config.withdrawal_limits())
    }

    /// Register a new client; identifiers are unique
    pub fn register_client(&mut self, details: NewClient) -> Result<&Client> {
        if self.clients.contains_key(&details.id) {
            return Err(Error::DuplicateClientIdentifier(details.id));
        }
        let id = details.id.clone();
        Ok(self.clients.entry(id).or_insert_with(|| Client::new(details)))
    }

    pub fn client(&self, client_id: &str) -> Result<&Client> {
        self.clients
            .get(client_id)
            .ok_or_else(|| Error::ClientNotFound(client_id.to_string()))
    }

    /// Open a current account for an existing client
    ///
    /// Account numbers are sequential, starting at 1.
    pub fn open_account(&mut self, client_id: &str) -> Result<AccountNumber> {
        let client = self
            .clients
            .get_mut(client_id)
            .ok_or_else(|| Error::ClientNotFound(client_id.to_string()))?;

        let number = AccountNumber(self.accounts.len() as u32 + 1);
        let account =
            Account::current_with_limits(number, self.branch.clone(), client.id(), self.limits);
        self.accounts.push(account);
        client.add_account(number);
        Ok(number)
    }

    pub fn account(&self, number: AccountNumber) -> Option<&Account> {
        let index = (number.0 as usize).checked_sub(1)?;
        self.accounts.get(index)
    }

    /// The account used for a client's operations (the first one opened)
    pub fn primary_account(&self, client_id: &str) -> Result<&Account> {
        let number = self.primary_account_number(client_id)?;
        self.account(number)
            .ok_or_else(|| Error::AccountNotFound(client_id.to_string()))
    }

    fn primary_account_number(&self, client_id: &str) -> Result<AccountNumber> {
        self.client(client_id)?
            .accounts()
            .first()
            .copied()
            .ok_or_else(|| Error::AccountNotFound(client_id.to_string()))
    }

    pub fn deposit(&mut self, client_id: &str, amount: Decimal) -> Result<Receipt> {
        self.execute(client_id, Transaction::deposit(amount))
    }

    pub fn withdraw(&mut self, client_id: &str, amount: Decimal) -> Result<Receipt> {
        self.execute(client_id, Transaction::withdrawal(amount))
    }

    /// Resolve the client's primary account and let the client initiate the transaction
    pub fn execute(&mut self, client_id: &str, transaction: Transaction) -> Result<Receipt> {
        let number = self.primary_account_number(client_id)?;
        let client = self
            .clients
            .get(client_id)
            .ok_or_else(|| Error::ClientNotFound(client_id.to_string()))?;
        let account = (number.0 as usize)
            .checked_sub(1)
            .and_then(|index| self.accounts.get_mut(index))
            .ok_or_else(|| Error::AccountNotFound(client_id.to_string()))?;

        client.initiate(account, &transaction)?;

        Ok(Receipt {
            account_number: number,
            kind: transaction.kind(),
            amount: transaction.amount(),
            balance: account.balance(),
            withdrawals_made_today: account.withdrawals_made_today(),
        })
    }

    /// Read-only statement of the client's primary account
    pub fn statement(&self, client_id: &str) -> Result<Statement> {
        let account = self.primary_account(client_id)?;
        Ok(Statement {
            account_number: account.number(),
            branch: account.branch().to_string(),
            entries: account.history().entries().to_vec(),
            balance: account.balance(),
        })
    }

    /// All accounts in the order they were opened
    pub fn list_accounts(&self) -> Vec<AccountSummary> {
        self.accounts
            .iter()
            .map(|account| AccountSummary {
                branch: account.branch().to_string(),
                number: account.number(),
                opened_at: account.opened_at(),
                holder: self
                    .clients
                    .get(account.owner_id())
                    .map(|c| c.name().to_string())
                    .unwrap_or_default(),
            })
            .collect()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

/// Confirmation of an applied transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub account_number: AccountNumber,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub balance: Decimal,
    pub withdrawals_made_today: u32,
}

/// Account statement: applied transactions plus current balance
#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    pub account_number: AccountNumber,
    pub branch: String,
    pub entries: Vec<HistoryEntry>,
    pub balance: Decimal,
}

/// One row of the account listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub branch: String,
    pub number: AccountNumber,
    pub holder: String,
    pub opened_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_with_client() -> Bank {
        let mut bank = Bank::default();
        bank.register_client(NewClient::new("111", "Alice")).unwrap();
        bank
    }

    #[test]
    fn test_duplicate_client_is_rejected() {
        let mut bank = bank_with_client();
        let err = bank
            .register_client(NewClient::new("111", "Someone Else"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateClientIdentifier(id) if id == "111"));
        assert_eq!(bank.client("111").unwrap().name(), "Alice");
        assert_eq!(bank.client_count(), 1);
    }

    #[test]
    fn test_open_account_requires_client() {
        let mut bank = Bank::default();
        assert!(matches!(
            bank.open_account("404"),
            Err(Error::ClientNotFound(_))
        ));
        assert_eq!(bank.account_count(), 0);
    }

    #[test]
    fn test_account_numbers_are_sequential() {
        let mut bank = bank_with_client();
        bank.register_client(NewClient::new("222", "Bob")).unwrap();

        assert_eq!(bank.open_account("111").unwrap(), AccountNumber(1));
        assert_eq!(bank.open_account("222").unwrap(), AccountNumber(2));
        assert_eq!(bank.open_account("111").unwrap(), AccountNumber(3));

        assert_eq!(
            bank.client("111").unwrap().accounts(),
            &[AccountNumber(1), AccountNumber(3)]
        );
        assert_eq!(bank.account(AccountNumber(2)).unwrap().owner_id(), "222");
        assert!(bank.account(AccountNumber(0)).is_none());
    }

    #[test]
    fn test_operations_use_first_account() {
        let mut bank = bank_with_client();
        bank.open_account("111").unwrap();
        bank.open_account("111").unwrap();

        let receipt = bank.deposit("111", Decimal::from(100)).unwrap();
        assert_eq!(receipt.account_number, AccountNumber(1));
        assert_eq!(bank.account(AccountNumber(2)).unwrap().balance(), Decimal::ZERO);
    }

    #[test]
    fn test_deposit_past_maximum_balance_leaves_account_unchanged() {
        let mut bank = bank_with_client();
        bank.open_account("111").unwrap();
        bank.deposit("111", Decimal::MAX).unwrap();

        let err = bank.deposit("111", Decimal::ONE).unwrap_err();
        assert!(matches!(err, Error::BalanceOverflow { .. }));

        let account = bank.primary_account("111").unwrap();
        assert_eq!(account.balance(), Decimal::MAX);
        assert_eq!(account.history().len(), 1);
    }

    #[test]
    fn test_client_without_account() {
        let mut bank = bank_with_client();
        assert!(matches!(
            bank.deposit("111", Decimal::from(10)),
            Err(Error::AccountNotFound(_))
        ));
        assert!(matches!(bank.statement("111"), Err(Error::AccountNotFound(_))));
    }

    #[test]
    fn test_unknown_client_operations() {
        let mut bank = Bank::default();
        assert!(matches!(
            bank.withdraw("999", Decimal::from(10)),
            Err(Error::ClientNotFound(_))
        ));
    }

    #[test]
    fn test_list_accounts() {
        let mut bank = bank_with_client();
        bank.register_client(NewClient::new("222", "Bob")).unwrap();
        bank.open_account("222").unwrap();
        bank.open_account("111").unwrap();

        let listing = bank.list_accounts();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].holder, "Bob");
        assert_eq!(listing[0].branch, "0001");
        assert_eq!(listing[1].number, AccountNumber(2));
        assert_eq!(listing[1].holder, "Alice");
        assert!(listing[0].opened_at <= listing[1].opened_at);
    }

    #[test]
    fn test_bank_uses_configured_limits() {
        let config = Config {
            branch_code: "0042".to_string(),
            per_withdrawal_limit: Decimal::from(100),
            daily_withdrawal_limit: 1,
            ..Config::default()
        };
        let mut bank = Bank::from_config(&config);
        bank.register_client(NewClient::new("111", "Alice")).unwrap();
        bank.open_account("111").unwrap();
        bank.deposit("111", Decimal::from(1000)).unwrap();

        assert!(matches!(
            bank.withdraw("111", Decimal::from(101)),
            Err(Error::ExceedsPerTransactionLimit { .. })
        ));
        bank.withdraw("111", Decimal::from(100)).unwrap();
        assert!(matches!(
            bank.withdraw("111", Decimal::from(1)),
            Err(Error::DailyWithdrawalLimitReached { limit: 1 })
        ));
        assert_eq!(bank.statement("111").unwrap().branch, "0042");
    }
}
