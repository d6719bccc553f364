//! Persistence seam for ledger entries.

use anyhow::Result;
use tracing::warn;

use crate::ledger::{EntryKind, LedgerEntry};

/// Insert/query/delete access to the ledger of one user.
pub trait LedgerStore {
    fn insert(&mut self, entry: LedgerEntry) -> Result<()>;

    /// Every entry, newest first (by date, then creation time).
    fn all(&self) -> Result<Vec<LedgerEntry>>;

    /// Returns false when no entry with that id belongs to `user_id`.
    fn delete(&mut self, id: &str, user_id: &str) -> Result<bool>;

    fn by_kind(&self, kind: EntryKind, user_id: &str) -> Result<Vec<LedgerEntry>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|e| e.kind == kind && e.user_id == user_id)
            .collect())
    }
}

/// Newest first: date descending, then creation time descending.
pub fn sort_newest_first(entries: &mut [LedgerEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.created_at.cmp(&a.created_at)));
}

/// Remove the entry with `id` owned by `user_id`; false if nothing matched.
pub fn remove_owned(entries: &mut Vec<LedgerEntry>, id: &str, user_id: &str) -> bool {
    let before = entries.len();
    entries.retain(|e| !(e.id == id && e.user_id == user_id));
    let removed = entries.len() != before;
    if !removed {
        warn!(id, "delete matched no ledger entry");
    }
    removed
}

/// In-process store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Vec<LedgerEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for MemoryStore {
    fn insert(&mut self, entry: LedgerEntry) -> Result<()> {
        self.entries.push(entry);
        Ok(())
    }

    fn all(&self) -> Result<Vec<LedgerEntry>> {
        let mut out = self.entries.clone();
        sort_newest_first(&mut out);
        Ok(out)
    }

    fn delete(&mut self, id: &str, user_id: &str) -> Result<bool> {
        Ok(remove_owned(&mut self.entries, id, user_id))
    }
}
