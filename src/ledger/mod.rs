//! The in-memory transaction list for one signed-in user.
//!
//! Mutations here never touch storage; the owning session saves the
//! whole list after every successful add or delete.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Transaction, TxKind};

/// Why a new entry was refused. Refusal leaves the list untouched; the
/// caller decides whether and how to surface the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryError {
    EmptyDescription,
    BadAmount,
}

impl std::fmt::Display for EntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "description cannot be empty"),
            Self::BadAmount => write!(f, "amount must be a positive number"),
        }
    }
}

impl std::error::Error for EntryError {}

/// Newest-first list of one user's transactions.
pub struct Ledger {
    entries: Vec<Transaction>,
}

impl Ledger {
    pub fn new(entries: Vec<Transaction>) -> Self {
        Self { entries }
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate and prepend a new entry. Returns the new id, or the
    /// refusal reason with no state change.
    pub fn add(
        &mut self,
        description: &str,
        amount_text: &str,
        kind: TxKind,
        now: DateTime<Utc>,
    ) -> Result<i64, EntryError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(EntryError::EmptyDescription);
        }
        let amount =
            Decimal::from_str(amount_text.trim()).map_err(|_| EntryError::BadAmount)?;
        if amount <= Decimal::ZERO {
            return Err(EntryError::BadAmount);
        }

        let id = self.next_id(now);
        self.entries.insert(
            0,
            Transaction {
                id,
                description: description.to_string(),
                amount,
                kind,
                occurred_at: now,
            },
        );
        Ok(id)
    }

    /// Remove the entry with `id`. Returns whether anything was
    /// removed; an unknown id is a no-op, not an error.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|txn| txn.id != id);
        self.entries.len() != before
    }

    pub fn find(&self, id: i64) -> Option<&Transaction> {
        self.entries.iter().find(|txn| txn.id == id)
    }

    /// Ids come from the creation instant in milliseconds. Entries are
    /// user-paced, so collisions are rare; when one happens (or the
    /// clock steps backwards), bump past the current maximum.
    fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let base = now.timestamp_millis();
        if self.entries.iter().all(|txn| txn.id != base) {
            return base;
        }
        self.entries
            .iter()
            .map(|txn| txn.id)
            .max()
            .map_or(base, |max| max.max(base) + 1)
    }
}
