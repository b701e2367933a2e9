//! Concurrent access tests
//!
//! The core itself is single-threaded. A host that shares a bank between
//! threads has to serialize access; these tests check that a bank behind a
//! mutex keeps every ledger invariant under contention.
//!
//! Run with: cargo test --test concurrent_access_test -- --nocapture

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

use rust_decimal::Decimal;

use minibank_core::services::Bank;
use minibank_core::{Error, NewClient};

/// Number of concurrent threads
const THREAD_COUNT: usize = 6;

/// Number of withdrawal attempts per thread
const ITERATIONS_PER_THREAD: usize = 5;

const CLIENT: &str = "55566677788";

fn shared_bank(initial: i64) -> Arc<Mutex<Bank>> {
    let mut bank = Bank::default();
    bank.register_client(NewClient::new(CLIENT, "Shared Holder"))
        .unwrap();
    bank.open_account(CLIENT).unwrap();
    bank.deposit(CLIENT, Decimal::from(initial)).unwrap();
    Arc::new(Mutex::new(bank))
}

/// Many threads race to withdraw; only three withdrawals may ever succeed
#[test]
fn test_withdrawal_cap_holds_under_contention() {
    let bank = shared_bank(10_000);
    let barrier = Arc::new(Barrier::new(THREAD_COUNT));
    let success_count = Arc::new(AtomicUsize::new(0));
    let capped_count = Arc::new(AtomicUsize::new(0));

    let mut handles = vec![];

    for _ in 0..THREAD_COUNT {
        let bank = Arc::clone(&bank);
        let barrier = Arc::clone(&barrier);
        let success_count = Arc::clone(&success_count);
        let capped_count = Arc::clone(&capped_count);

        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..ITERATIONS_PER_THREAD {
                let mut bank = bank.lock().unwrap();
                match bank.withdraw(CLIENT, Decimal::from(100)) {
                    Ok(_) => {
                        success_count.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(Error::DailyWithdrawalLimitReached { .. }) => {
                        capped_count.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(e) => panic!("unexpected error: {}", e),
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(success_count.load(Ordering::SeqCst), 3);
    assert_eq!(
        capped_count.load(Ordering::SeqCst),
        THREAD_COUNT * ITERATIONS_PER_THREAD - 3
    );

    let bank = bank.lock().unwrap();
    let statement = bank.statement(CLIENT).unwrap();
    assert_eq!(statement.balance, Decimal::from(9_700));
    assert_eq!(statement.entries.len(), 4);
}

/// Threads depositing and withdrawing concurrently never drive the balance negative
#[test]
fn test_balance_never_negative_under_contention() {
    let bank = shared_bank(150);
    let barrier = Arc::new(Barrier::new(THREAD_COUNT));

    let mut handles = vec![];
    for thread_id in 0..THREAD_COUNT {
        let bank = Arc::clone(&bank);
        let barrier = Arc::clone(&barrier);

        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..ITERATIONS_PER_THREAD {
                let mut bank = bank.lock().unwrap();
                if thread_id % 2 == 0 {
                    let _ = bank.withdraw(CLIENT, Decimal::from(100));
                } else {
                    bank.deposit(CLIENT, Decimal::from(10)).unwrap();
                }
                assert!(bank.statement(CLIENT).unwrap().balance >= Decimal::ZERO);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let bank = bank.lock().unwrap();
    let account = bank.primary_account(CLIENT).unwrap();
    assert!(account.withdrawals_made_today() <= 3);
    assert!(account.balance() >= Decimal::ZERO);
}
