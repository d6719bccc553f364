//! budget-core: ledger types, categories, totals and spending summaries

pub mod categories;
pub mod ledger;
pub mod store;
pub mod summary;

pub use categories::{
    expense_class, find_group, group_of, CategoryGroup, ExpenseClass, INCOME_CATEGORIES,
};
pub use ledger::{EntryKind, LedgerEntry, LedgerError, NewEntry, DEFAULT_USER_ID};
pub use store::{LedgerStore, MemoryStore};
pub use summary::{
    category_breakdown, format_inr, group_expenses, spending_summary, GroupExpenses, GroupShare,
    Totals,
};
