//! Integration tests for minibank-core
//!
//! These drive the registry exactly the way the shell does and check the
//! ledger scenarios end to end.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use rust_decimal::Decimal;

use minibank_core::services::Bank;
use minibank_core::{AccountNumber, Error, NewClient, OperationResult, TransactionKind};

// ============================================================================
// Test Helpers
// ============================================================================

const CLIENT: &str = "12345678900";

/// Bank with one registered client owning one current account
fn bank_with_account() -> Bank {
    let mut bank = Bank::default();
    bank.register_client(NewClient::new(CLIENT, "Maria Silva"))
        .expect("register client");
    bank.open_account(CLIENT).expect("open account");
    bank
}

fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

fn history_of(bank: &Bank) -> Vec<(TransactionKind, Decimal)> {
    bank.statement(CLIENT)
        .unwrap()
        .entries
        .iter()
        .map(|e| (e.kind, e.amount))
        .collect()
}

// ============================================================================
// Ledger Scenarios
// ============================================================================

#[test]
fn test_deposit_withdraw_then_insufficient_funds() {
    let mut bank = bank_with_account();

    let receipt = bank.deposit(CLIENT, dec(1000)).unwrap();
    assert_eq!(receipt.balance, dec(1000));
    assert_eq!(history_of(&bank), vec![(TransactionKind::Deposit, dec(1000))]);

    let receipt = bank.withdraw(CLIENT, dec(500)).unwrap();
    assert_eq!(receipt.balance, dec(500));
    assert_eq!(receipt.withdrawals_made_today, 1);
    assert_eq!(
        history_of(&bank),
        vec![
            (TransactionKind::Deposit, dec(1000)),
            (TransactionKind::Withdrawal, dec(500)),
        ]
    );

    let err = bank.withdraw(CLIENT, dec(600)).unwrap_err();
    assert!(matches!(err, Error::InsufficientFunds { .. }));
    assert_eq!(bank.statement(CLIENT).unwrap().balance, dec(500));
    assert_eq!(history_of(&bank).len(), 2);
}

#[test]
fn test_per_transaction_cap_regardless_of_balance() {
    let mut bank = bank_with_account();
    bank.deposit(CLIENT, dec(10_000)).unwrap();

    let err = bank.withdraw(CLIENT, dec(501)).unwrap_err();
    assert!(matches!(
        err,
        Error::ExceedsPerTransactionLimit { limit, requested }
            if limit == dec(500) && requested == dec(501)
    ));
    assert_eq!(bank.statement(CLIENT).unwrap().balance, dec(10_000));

    // On an empty account the cap still wins over insufficient funds
    let mut empty = bank_with_account();
    assert!(matches!(
        empty.withdraw(CLIENT, dec(501)),
        Err(Error::ExceedsPerTransactionLimit { .. })
    ));
}

#[test]
fn test_daily_withdrawal_count_cap() {
    let mut bank = bank_with_account();
    bank.deposit(CLIENT, dec(2000)).unwrap();

    for expected_count in 1..=3 {
        let receipt = bank.withdraw(CLIENT, dec(100)).unwrap();
        assert_eq!(receipt.withdrawals_made_today, expected_count);
    }

    let err = bank.withdraw(CLIENT, dec(100)).unwrap_err();
    assert!(matches!(err, Error::DailyWithdrawalLimitReached { limit: 3 }));

    let statement = bank.statement(CLIENT).unwrap();
    assert_eq!(statement.balance, dec(1700));
    assert_eq!(statement.entries.len(), 4);

    // Deposits are not affected by the withdrawal cap
    bank.deposit(CLIENT, dec(1)).unwrap();
    assert_eq!(bank.statement(CLIENT).unwrap().balance, dec(1701));
}

#[test]
fn test_negative_deposit_changes_nothing() {
    let mut bank = bank_with_account();

    let err = bank.deposit(CLIENT, dec(-50)).unwrap_err();
    assert!(matches!(err, Error::InvalidAmount { amount } if amount == dec(-50)));

    let statement = bank.statement(CLIENT).unwrap();
    assert_eq!(statement.balance, Decimal::ZERO);
    assert!(statement.entries.is_empty());
}

#[test]
fn test_failed_withdrawal_is_idempotent() {
    let mut bank = bank_with_account();
    bank.deposit(CLIENT, dec(300)).unwrap();

    let _ = bank.withdraw(CLIENT, dec(400));
    let once = bank.statement(CLIENT).unwrap();
    let _ = bank.withdraw(CLIENT, dec(400));
    let twice = bank.statement(CLIENT).unwrap();

    assert_eq!(once.balance, twice.balance);
    assert_eq!(once.entries, twice.entries);
    assert_eq!(
        bank.primary_account(CLIENT).unwrap().withdrawals_made_today(),
        0
    );
}

#[test]
fn test_fractional_amounts() {
    let mut bank = bank_with_account();
    bank.deposit(CLIENT, Decimal::new(10010, 2)).unwrap();
    bank.withdraw(CLIENT, Decimal::new(10010, 2)).unwrap();
    assert_eq!(bank.statement(CLIENT).unwrap().balance, Decimal::ZERO);
}

// ============================================================================
// Registry Tests
// ============================================================================

#[test]
fn test_history_sequence_matches_application_order() {
    let mut bank = bank_with_account();
    bank.deposit(CLIENT, dec(50)).unwrap();
    let _ = bank.withdraw(CLIENT, dec(80));
    bank.deposit(CLIENT, dec(70)).unwrap();
    bank.withdraw(CLIENT, dec(20)).unwrap();

    let entries = bank.statement(CLIENT).unwrap().entries;
    let sequences: Vec<u64> = entries.iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, vec![0, 1, 2]);
    assert_eq!(entries[2].kind, TransactionKind::Withdrawal);
}

#[test]
fn test_accounts_are_isolated_between_clients() {
    let mut bank = bank_with_account();
    bank.register_client(NewClient::new("98765432100", "Joao Souza"))
        .unwrap();
    let other = bank.open_account("98765432100").unwrap();
    assert_eq!(other, AccountNumber(2));

    bank.deposit(CLIENT, dec(100)).unwrap();
    bank.deposit("98765432100", dec(900)).unwrap();

    assert_eq!(bank.statement(CLIENT).unwrap().balance, dec(100));
    assert_eq!(bank.statement("98765432100").unwrap().balance, dec(900));

    let listing = bank.list_accounts();
    let holders: Vec<&str> = listing.iter().map(|a| a.holder.as_str()).collect();
    assert_eq!(holders, vec!["Maria Silva", "Joao Souza"]);
}

#[test]
fn test_operation_result_reports_reason() {
    let mut bank = bank_with_account();

    let ok: OperationResult<_> = bank.deposit(CLIENT, dec(10)).into();
    assert!(ok.success);

    let failed: OperationResult<_> = bank.withdraw(CLIENT, dec(20)).into();
    assert!(!failed.success);
    assert_eq!(failed.code.as_deref(), Some("insufficient_funds"));

    let json = serde_json::to_value(&failed).unwrap();
    assert_eq!(json["success"], false);
}
