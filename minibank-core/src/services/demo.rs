//! Demo service - sample data for trying the shell
//!
//! Seeds an in-memory bank through the same public operations the shell
//! uses, so demo data obeys every ledger rule.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::{AccountNumber, NewClient};
use crate::services::Bank;

/// Identifier of the seeded demo client
pub const DEMO_CLIENT_ID: &str = "00000000191";

/// What the demo seed created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSeed {
    pub client_id: String,
    pub account_number: AccountNumber,
    pub transactions_applied: usize,
}

/// Populate `bank` with one demo client, an account and a short history
pub fn seed(bank: &mut Bank) -> Result<DemoSeed> {
    let details = NewClient::new(DEMO_CLIENT_ID, "Demo Client")
        .with_address("Rua das Flores, 100 - Centro - Sao Paulo/SP");
    let details = match NaiveDate::from_ymd_opt(1990, 5, 17) {
        Some(date) => details.with_birth_date(date),
        None => details,
    };
    bank.register_client(details)?;
    let account_number = bank.open_account(DEMO_CLIENT_ID)?;

    bank.deposit(DEMO_CLIENT_ID, Decimal::new(150000, 2))?;
    bank.withdraw(DEMO_CLIENT_ID, Decimal::new(23590, 2))?;
    bank.deposit(DEMO_CLIENT_ID, Decimal::new(4210, 2))?;

    Ok(DemoSeed {
        client_id: DEMO_CLIENT_ID.to_string(),
        account_number,
        transactions_applied: 3,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::Error;

    #[test]
    fn test_seed_populates_bank() {
        let mut bank = Bank::default();
        let seeded = seed(&mut bank).unwrap();

        let statement = bank.statement(&seeded.client_id).unwrap();
        assert_eq!(statement.entries.len(), seeded.transactions_applied);
        assert_eq!(statement.balance, Decimal::new(130620, 2));
        assert_eq!(
            bank.primary_account(DEMO_CLIENT_ID).unwrap().withdrawals_made_today(),
            1
        );
    }

    #[test]
    fn test_seed_twice_fails() {
        let mut bank = Bank::default();
        seed(&mut bank).unwrap();
        assert!(matches!(
            seed(&mut bank),
            Err(Error::DuplicateClientIdentifier(_))
        ));
    }
}
