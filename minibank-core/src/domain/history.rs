//! Transaction history domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// A single applied transaction as recorded in an account's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Zero-based position in the history
    pub sequence: u64,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only log of the transactions applied to one account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an applied transaction and return the stored entry
    pub(crate) fn append(&mut self, kind: TransactionKind, amount: Decimal) -> &HistoryEntry {
        let entry = HistoryEntry {
            sequence: self.entries.len() as u64,
            kind,
            amount,
            recorded_at: Utc::now(),
        };
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Entries in the order they were applied
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
