//! Core domain entities
//!
//! Pure data structures with their validation rules - no I/O.

mod account;
mod client;
mod history;
pub mod policy;
pub mod result;
mod transaction;

pub use account::{Account, AccountNumber, DEFAULT_BRANCH};
pub use client::{Client, NewClient, BIRTH_DATE_FORMAT};
pub use history::{History, HistoryEntry};
pub use policy::{WithdrawalLimits, WithdrawalPolicy};
pub use transaction::{Transaction, TransactionKind};
