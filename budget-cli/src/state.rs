use anyhow::{Context, Result};
use budget_core::store::{remove_owned, sort_newest_first};
use budget_core::{LedgerEntry, LedgerStore};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// `$BUDGETBUDDY_HOME`, else `~/.budgetbuddy`
pub fn budget_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("BUDGETBUDDY_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".budgetbuddy"))
}

pub fn ensure_budget_home() -> Result<PathBuf> {
    let dir = budget_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Ledger file location; relative paths are resolved against the home dir.
pub fn ledger_path(file: &str) -> Result<PathBuf> {
    let p = PathBuf::from(file);
    if p.is_absolute() {
        return Ok(p);
    }
    Ok(ensure_budget_home()?.join(p))
}

/// Ledger kept as one pretty-printed JSON array, rewritten on every change.
#[derive(Debug)]
pub struct JsonLedgerStore {
    path: PathBuf,
    entries: Vec<LedgerEntry>,
}

impl JsonLedgerStore {
    /// Load the ledger at `path`; a missing file is an empty ledger.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
            if s.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?
            }
        } else {
            Vec::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk and adopt them only once the write succeeded.
    fn commit(&mut self, entries: Vec<LedgerEntry>) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        self.entries = entries;
        Ok(())
    }
}

impl LedgerStore for JsonLedgerStore {
    fn insert(&mut self, entry: LedgerEntry) -> Result<()> {
        info!(id = %entry.id, kind = entry.kind.as_str(), "recording ledger entry");
        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next)
    }

    fn all(&self) -> Result<Vec<LedgerEntry>> {
        let mut out = self.entries.clone();
        sort_newest_first(&mut out);
        Ok(out)
    }

    fn delete(&mut self, id: &str, user_id: &str) -> Result<bool> {
        let mut next = self.entries.clone();
        let removed = remove_owned(&mut next, id, user_id);
        if removed {
            self.commit(next)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use budget_core::NewEntry;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("ledger.json");

        let mut store = JsonLedgerStore::open(&path).unwrap();
        assert!(store.all().unwrap().is_empty());
        assert!(!path.exists());

        let now = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        let entry = NewEntry::expense(now, "Groceries run", 840.0, "Groceries")
            .into_entry("default_user", now)
            .unwrap();
        let id = entry.id.clone();
        store.insert(entry).unwrap();
        assert!(path.exists());

        let reopened = JsonLedgerStore::open(&path).unwrap();
        let all = reopened.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].description, "Groceries run");

        let mut reopened = reopened;
        assert!(reopened.delete(&id, "default_user").unwrap());
        assert!(JsonLedgerStore::open(&path).unwrap().all().unwrap().is_empty());
    }

    #[test]
    fn test_failed_write_leaves_ledger_unchanged() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let mut store = JsonLedgerStore::open(blocker.join("ledger.json")).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap();
        let entry = NewEntry::income(now, "Salary", 50000.0, "Earned Income")
            .into_entry("default_user", now)
            .unwrap();

        assert!(store.insert(entry).is_err());
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "{not json").unwrap();
        assert!(JsonLedgerStore::open(&path).is_err());
    }

    #[test]
    fn test_empty_file_is_empty_ledger() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "").unwrap();
        assert!(JsonLedgerStore::open(&path).unwrap().all().unwrap().is_empty());
    }
}
