//! Append-only history of executed matches.

use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::price::Price;

/// One executed pairing.
///
/// Both counterparties' raw limit prices are preserved; the engine does
/// not compute a single execution price from them. Records are immutable
/// once appended and never removed.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub buy_price: Price,
    pub sell_price: Price,
    pub amount: u32,
}

/// Append-only match ledger.
///
/// Appends happen inside the matching critical section, so the stored
/// sequence is the causal execution order: record *i* happened before
/// record *i + 1*. Reads copy out and never hold up matching for long.
#[derive(Debug, Default)]
pub struct MatchLedger {
    records: RwLock<Vec<MatchRecord>>,
}

impl MatchLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        MatchLedger::default()
    }

    /// Record one executed pairing. Called exactly once per execution.
    pub fn append(&self, record: MatchRecord) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// The full history, oldest first.
    pub fn history(&self) -> Vec<MatchRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The `limit` most recent records, oldest of them first; the whole
    /// history when `limit` reaches or exceeds its length.
    pub fn latest(&self, limit: usize) -> Vec<MatchRecord> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let start = records.len().saturating_sub(limit);
        records[start..].to_vec()
    }

    /// Number of executions recorded so far.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// `true` if nothing has matched yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
