//! Ledger entry types for recorded income and expenses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::categories::{expense_class, group_of, ExpenseClass};

pub const DEFAULT_USER_ID: &str = "default_user";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("amount must be a positive number, got {0}")]
    InvalidAmount(f64),
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("no ledger entry with id {0}")]
    NotFound(String),
}

/// Income or expense
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntryKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// When the money moved
    pub date: DateTime<Utc>,
    /// Always positive; direction comes from `kind`
    pub amount: f64,
    /// Source name for income, expense name for expenses
    pub description: String,
    /// Income category or detailed expense category
    pub category: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    /// Positive for income, negative for expenses
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense => -self.amount,
        }
    }

    /// Essential/variable class; `None` for income
    pub fn expense_class(&self) -> Option<ExpenseClass> {
        self.is_expense().then(|| expense_class(&self.category))
    }

    /// Expense group (Housing, Food, ...) when the category is a known one
    pub fn group(&self) -> Option<&'static str> {
        if self.is_expense() { group_of(&self.category) } else { None }
    }
}

/// Input for a new ledger entry, before id and timestamps are assigned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewEntry {
    pub kind: EntryKind,
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub notes: Option<String>,
}

impl NewEntry {
    pub fn income(
        date: DateTime<Utc>,
        source: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            kind: EntryKind::Income,
            date,
            amount,
            description: source.into(),
            category: category.into(),
            notes: None,
        }
    }

    pub fn expense(
        date: DateTime<Utc>,
        name: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            kind: EntryKind::Expense,
            date,
            amount,
            description: name.into(),
            category: category.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes.filter(|n| !n.trim().is_empty());
        self
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(self.amount));
        }
        if self.description.trim().is_empty() {
            return Err(LedgerError::EmptyField("description"));
        }
        if self.category.trim().is_empty() {
            return Err(LedgerError::EmptyField("category"));
        }
        Ok(())
    }

    /// Validate and stamp with a fresh id, owner and creation time.
    pub fn into_entry(self, user_id: &str, now: DateTime<Utc>) -> Result<LedgerEntry, LedgerError> {
        self.validate()?;
        Ok(LedgerEntry {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            kind: self.kind,
            date: self.date,
            amount: self.amount,
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            notes: self.notes,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_entry_creation() {
        let entry = NewEntry::expense(at(5), "Monthly rent", 18000.0, "Rent / Mortgage")
            .into_entry(DEFAULT_USER_ID, at(6))
            .unwrap();
        assert!(entry.is_expense());
        assert_eq!(entry.signed_amount(), -18000.0);
        assert_eq!(entry.expense_class(), Some(ExpenseClass::Essential));
        assert_eq!(entry.group(), Some("Housing"));
        assert_eq!(entry.user_id, "default_user");
        assert!(Uuid::parse_str(&entry.id).is_ok());
    }

    #[test]
    fn test_income_has_no_class() {
        let entry = NewEntry::income(at(1), "Salary", 50000.0, "Earned Income")
            .into_entry(DEFAULT_USER_ID, at(1))
            .unwrap();
        assert!(entry.is_income());
        assert_eq!(entry.expense_class(), None);
        assert_eq!(entry.group(), None);
    }

    #[test]
    fn test_validation() {
        let bad = NewEntry::expense(at(1), "Coffee", 0.0, "Coffee Shops");
        assert_eq!(bad.validate(), Err(LedgerError::InvalidAmount(0.0)));

        let bad = NewEntry::expense(at(1), "Coffee", f64::NAN, "Coffee Shops");
        assert!(matches!(bad.validate(), Err(LedgerError::InvalidAmount(_))));

        let bad = NewEntry::expense(at(1), "  ", 10.0, "Coffee Shops");
        assert_eq!(bad.validate(), Err(LedgerError::EmptyField("description")));

        let bad = NewEntry::income(at(1), "Gift", 10.0, "");
        assert_eq!(bad.validate(), Err(LedgerError::EmptyField("category")));
    }

    #[test]
    fn test_blank_notes_dropped() {
        let e = NewEntry::income(at(1), "Gift", 10.0, "Gifted or Windfall Money")
            .with_notes(Some("   ".to_string()));
        assert_eq!(e.notes, None);
    }

    #[test]
    fn test_json_field_names() {
        let entry = NewEntry::income(at(1), "Salary", 100.0, "Earned Income")
            .into_entry("u1", at(2))
            .unwrap();
        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["type"], "income");
        assert_eq!(v["userId"], "u1");
        assert!(v.get("createdAt").is_some());
    }
}
