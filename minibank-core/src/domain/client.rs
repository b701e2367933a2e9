//! Client domain model

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::account::{Account, AccountNumber};
use super::result::Result;
use super::transaction::Transaction;

/// Date format used for birth dates entered in the shell
pub const BIRTH_DATE_FORMAT: &str = "%d-%m-%Y";

/// Personal details collected when registering a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    /// National identifier (digits only), unique per client
    pub id: String,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub address: String,
}

impl NewClient {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth_date: None,
            address: String::new(),
        }
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Parse a `dd-mm-yyyy` birth date
    pub fn parse_birth_date(text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), BIRTH_DATE_FORMAT).ok()
    }
}

/// A bank customer and the numbers of the accounts they own
#[derive(Debug, Clone, Serialize)]
pub struct Client {
    id: String,
    name: String,
    birth_date: Option<NaiveDate>,
    address: String,
    accounts: Vec<AccountNumber>,
}

impl Client {
    pub fn new(details: NewClient) -> Self {
        Self {
            id: details.id,
            name: details.name,
            birth_date: details.birth_date,
            address: details.address,
            accounts: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Owned accounts in the order they were opened
    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    pub(crate) fn add_account(&mut self, number: AccountNumber) {
        self.accounts.push(number);
    }

    /// Run a transaction against one of this client's accounts
    pub fn initiate(&self, account: &mut Account, transaction: &Transaction) -> Result<()> {
        debug_assert_eq!(account.owner_id(), self.id, "account not owned by client");
        transaction.apply(account)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}, ID: {}", self.name, self.id)
    }
}
