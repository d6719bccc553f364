//! Totals, category breakdown and the plain-text spending summary handed to
//! the savings advisor.

use std::collections::HashMap;

use serde::Serialize;

use crate::categories::{group_of, CategoryGroup};
use crate::ledger::{EntryKind, LedgerEntry};

/// How many recent entries of each kind go into the spending summary
pub const SUMMARY_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

impl Totals {
    pub fn from_entries(entries: &[LedgerEntry]) -> Self {
        let income = sum_kind(entries, EntryKind::Income);
        let expenses = sum_kind(entries, EntryKind::Expense);
        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }
}

fn sum_kind(entries: &[LedgerEntry], kind: EntryKind) -> f64 {
    entries.iter().filter(|e| e.kind == kind).map(|e| e.amount).sum()
}

/// One slice of the expense breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupShare {
    pub group: &'static str,
    pub total: f64,
    pub count: usize,
    /// Share of all grouped expenses, 0..=100
    pub percentage: f64,
}

/// Expense totals per category group, largest first.
/// Expenses whose category belongs to no group are left out.
pub fn category_breakdown(entries: &[LedgerEntry]) -> Vec<GroupShare> {
    let mut groups: HashMap<&'static str, (f64, usize)> = HashMap::new();
    for e in entries.iter().filter(|e| e.is_expense()) {
        if let Some(group) = group_of(&e.category) {
            let slot = groups.entry(group).or_insert((0.0, 0));
            slot.0 += e.amount;
            slot.1 += 1;
        }
    }

    let grand: f64 = groups.values().map(|(t, _)| t).sum();
    let mut out: Vec<GroupShare> = groups
        .into_iter()
        .map(|(group, (total, count))| GroupShare {
            group,
            total,
            count,
            percentage: if grand == 0.0 { 0.0 } else { total / grand * 100.0 },
        })
        .collect();

    out.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.group.cmp(b.group)));
    out
}

/// Expenses filed under one category group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupExpenses<'a> {
    pub group: &'static CategoryGroup,
    /// In the order given, normally newest first
    pub entries: Vec<&'a LedgerEntry>,
    pub total: f64,
}

pub fn group_expenses<'a>(entries: &'a [LedgerEntry], group: &'static CategoryGroup) -> GroupExpenses<'a> {
    let entries: Vec<&LedgerEntry> = entries
        .iter()
        .filter(|e| e.is_expense() && group.options.contains(&e.category.as_str()))
        .collect();
    let total = entries.iter().map(|e| e.amount).sum();
    GroupExpenses { group, entries, total }
}

/// Rupee amount with Indian digit grouping: ₹12,34,567.89
pub fn format_inr(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if int_part.len() <= 3 {
        int_part.to_string()
    } else {
        let (head, tail) = int_part.split_at(int_part.len() - 3);
        let mut pairs: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (h, t) = rest.split_at(rest.len() - 2);
            pairs.push(t);
            rest = h;
        }
        pairs.push(rest);
        pairs.reverse();
        format!("{},{}", pairs.join(","), tail)
    };

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}₹{grouped}.{frac}")
}

/// Summary of income and recent spending, in the shape the advisor prompt
/// expects. `entries` should already be newest first.
pub fn spending_summary(entries: &[LedgerEntry]) -> String {
    if entries.is_empty() {
        return "No financial data recorded yet. Please add income and expenses to get personalized suggestions.".to_string();
    }

    let totals = Totals::from_entries(entries);
    let mut s = format!("Total Income: {}.\n\n", format_inr(totals.income));

    let income: Vec<_> = entries.iter().filter(|e| e.is_income()).collect();
    if income.is_empty() {
        s.push_str("No income entries recorded yet.\n\n");
    } else {
        s.push_str("Recent Income Entries (up to 5):\n");
        for e in income.iter().take(SUMMARY_RECENT_LIMIT) {
            s.push_str(&format!(
                "- {} ({}) - Category: {} (Received: {})\n",
                e.description,
                format_inr(e.amount),
                e.category,
                e.date.format("%-d/%-m/%Y")
            ));
        }
        s.push('\n');
    }

    s.push_str("Recent Expenses (up to 5):\n");
    let expenses: Vec<_> = entries.iter().filter(|e| e.is_expense()).collect();
    if expenses.is_empty() {
        s.push_str("No expenses recorded yet.\n");
    } else {
        for e in expenses.iter().take(SUMMARY_RECENT_LIMIT) {
            let class = e.expense_class().map(|c| c.as_str()).unwrap_or("variable");
            s.push_str(&format!(
                "- {} ({}) - Category: {} ({})\n",
                e.description,
                format_inr(e.amount),
                e.category,
                class
            ));
        }
    }
    s
}
