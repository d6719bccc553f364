use anyhow::{bail, Context, Result};
use budget_core::categories::{FIXED_GROUPS, VARIABLE_GROUPS};
use budget_core::{
    category_breakdown, find_group, format_inr, group_expenses, EntryKind, GroupExpenses,
    LedgerEntry, LedgerStore, NewEntry, Totals, INCOME_CATEGORIES,
};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Subcommand, ValueEnum};
use tracing::warn;

#[derive(Subcommand, Debug)]
pub enum IncomeCommand {
    /// Record income
    Add {
        /// Where the money came from (employer, client, ...)
        #[arg(long)]
        source: String,

        #[arg(long)]
        amount: f64,

        /// One of the income categories (see `budget categories`)
        #[arg(long)]
        category: String,

        /// YYYY-MM-DD or RFC 3339; defaults to now
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ExpenseCommand {
    /// Record an expense
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        amount: f64,

        /// Detailed expense category (see `budget categories`)
        #[arg(long)]
        category: String,

        /// YYYY-MM-DD or RFC 3339; defaults to now
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindFilter {
    Income,
    Expense,
}

impl From<KindFilter> for EntryKind {
    fn from(k: KindFilter) -> Self {
        match k {
            KindFilter::Income => EntryKind::Income,
            KindFilter::Expense => EntryKind::Expense,
        }
    }
}

/// Accepts `2024-01-05` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_date_arg(s: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(now);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}' (expected YYYY-MM-DD or RFC 3339)"))?;
    d.and_hms_opt(0, 0, 0)
        .map(|ndt| ndt.and_utc())
        .with_context(|| format!("invalid date '{s}'"))
}

pub fn add_income(
    store: &mut dyn LedgerStore,
    user_id: &str,
    cmd: IncomeCommand,
    now: DateTime<Utc>,
) -> Result<LedgerEntry> {
    let IncomeCommand::Add {
        source,
        amount,
        category,
        date,
        note,
    } = cmd;

    if !INCOME_CATEGORIES.contains(&category.as_str()) {
        warn!(%category, "income category is not one of the standard categories");
    }
    let date = date.map(|d| parse_date_arg(&d, now)).transpose()?.unwrap_or(now);
    let entry = NewEntry::income(date, source, amount, category)
        .with_notes(note)
        .into_entry(user_id, now)?;
    store.insert(entry.clone())?;
    Ok(entry)
}

pub fn add_expense(
    store: &mut dyn LedgerStore,
    user_id: &str,
    cmd: ExpenseCommand,
    now: DateTime<Utc>,
) -> Result<LedgerEntry> {
    let ExpenseCommand::Add {
        name,
        amount,
        category,
        date,
        notes,
    } = cmd;

    if !budget_core::categories::is_expense_category(&category) {
        warn!(%category, "expense category is not in any category group; it will be left out of the breakdown");
    }
    let date = date.map(|d| parse_date_arg(&d, now)).transpose()?.unwrap_or(now);
    let entry = NewEntry::expense(date, name, amount, category)
        .with_notes(notes)
        .into_entry(user_id, now)?;
    store.insert(entry.clone())?;
    Ok(entry)
}

pub fn list_entries(
    store: &dyn LedgerStore,
    user_id: &str,
    kind: Option<KindFilter>,
) -> Result<Vec<LedgerEntry>> {
    let all = store.all()?.into_iter().filter(|e| e.user_id == user_id);
    Ok(match kind {
        Some(k) => all.filter(|e| e.kind == EntryKind::from(k)).collect(),
        None => all.collect(),
    })
}

pub fn delete_entry(store: &mut dyn LedgerStore, user_id: &str, id: &str) -> Result<()> {
    if !store.delete(id, user_id)? {
        bail!(budget_core::LedgerError::NotFound(id.to_string()));
    }
    Ok(())
}

pub fn format_entry(e: &LedgerEntry) -> String {
    let class = e
        .expense_class()
        .map(|c| format!(" ({})", c.as_str()))
        .unwrap_or_default();
    let sign = if e.is_expense() { "-" } else { "+" };
    format!(
        "{}  {}  {:<7}  {}{:>14}  {} [{}{}]{}",
        e.id,
        e.date.format("%Y-%m-%d"),
        e.kind.as_str(),
        sign,
        format_inr(e.amount),
        e.description,
        e.category,
        class,
        e.notes
            .as_deref()
            .map(|n| format!("  note: {n}"))
            .unwrap_or_default()
    )
}

pub fn render_breakdown(entries: &[LedgerEntry]) -> String {
    let totals = Totals::from_entries(entries);
    let mut s = String::new();
    s.push_str(&format!("Total income:      {}\n", format_inr(totals.income)));
    s.push_str(&format!("Total expenses:    {}\n", format_inr(totals.expenses)));
    s.push_str(&format!("Available balance: {}\n", format_inr(totals.balance)));

    let shares = category_breakdown(entries);
    if shares.is_empty() {
        s.push_str("\nNo categorized expenses yet.\n");
        return s;
    }
    s.push_str("\nExpenses by category:\n");
    for g in shares {
        s.push_str(&format!(
            "- {:<16} {:>14}  {:>5.1}%  ({} entries)\n",
            g.group,
            format_inr(g.total),
            g.percentage,
            g.count
        ));
    }
    s
}

const RECEIPT_RULE: &str = "--------------------------------------------------";

/// Expenses of the named group (display name or slug, e.g. `personal-care`).
pub fn expenses_for_group<'a>(entries: &'a [LedgerEntry], name: &str) -> Result<GroupExpenses<'a>> {
    let Some(group) = find_group(name) else {
        let known: Vec<&str> = FIXED_GROUPS.iter().chain(VARIABLE_GROUPS).map(|g| g.name).collect();
        bail!("unknown category group '{name}' (one of: {})", known.join(", "));
    };
    Ok(group_expenses(entries, group))
}

pub fn render_group(g: &GroupExpenses<'_>) -> String {
    let name = g.group.name;
    let mut s = format!("{name} Expenses\nTotal Spent in {name}: {}\n\n", format_inr(g.total));
    if g.entries.is_empty() {
        s.push_str(&format!("No expenses recorded in {name} yet.\n"));
        return s;
    }
    for e in &g.entries {
        s.push_str(&format!(
            "{:<11}  {:<20}  {:<20}  {:>14}  {}\n",
            e.date.format("%-d %b %Y").to_string(),
            e.description,
            e.category,
            format_inr(e.amount),
            e.id
        ));
    }
    s.push_str("\nRemove an entry with `budget delete <ID>`.\n");
    s
}

/// Plain-text receipt for one group's expenses.
pub fn render_receipt(g: &GroupExpenses<'_>, user: &str, now: DateTime<Utc>) -> String {
    let name = g.group.name;
    let mut s = format!("{name} Expenses Receipt\n");
    s.push_str(&format!("User: {user}\n"));
    s.push_str(&format!("Date Generated: {}\n", now.format("%B %-d, %Y %-I:%M %p")));
    s.push_str(RECEIPT_RULE);
    s.push('\n');
    s.push_str("Date       | Expense Name         | Detailed Category    | Amount (₹)\n");
    s.push_str(RECEIPT_RULE);
    s.push('\n');
    for e in &g.entries {
        s.push_str(&format!(
            "{:<10} | {:<20} | {:<20} | {:>12}\n",
            e.date.format("%Y-%m-%d").to_string(),
            e.description,
            e.category,
            format_inr(e.amount)
        ));
    }
    s.push_str(RECEIPT_RULE);
    s.push('\n');
    s.push_str(&format!("Total for {name}: {:>40}\n", format_inr(g.total)));
    s
}

pub fn render_categories() -> String {
    let mut s = String::from("Income categories:\n");
    for c in INCOME_CATEGORIES {
        s.push_str(&format!("- {c}\n"));
    }
    for (title, groups) in [("Fixed (essential)", FIXED_GROUPS), ("Variable", VARIABLE_GROUPS)] {
        s.push_str(&format!("\n{title} expenses:\n"));
        for g in groups {
            s.push_str(&format!("{}:\n", g.name));
            for opt in g.options {
                s.push_str(&format!("  - {opt}\n"));
            }
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use budget_core::MemoryStore;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg("2024-01-05", now()).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_date_arg("2024-01-05T10:30:00+05:30", now()).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 5, 5, 0, 0).unwrap()
        );
        assert_eq!(parse_date_arg("", now()).unwrap(), now());
        assert!(parse_date_arg("05/01/2024", now()).is_err());
    }

    #[test]
    fn test_add_list_delete() {
        let mut store = MemoryStore::new();
        let income = add_income(
            &mut store,
            "u",
            IncomeCommand::Add {
                source: "Salary".into(),
                amount: 50000.0,
                category: "Earned Income".into(),
                date: Some("2024-02-01".into()),
                note: None,
            },
            now(),
        )
        .unwrap();
        add_expense(
            &mut store,
            "u",
            ExpenseCommand::Add {
                name: "Rent".into(),
                amount: 18000.0,
                category: "Rent / Mortgage".into(),
                date: None,
                notes: Some("March".into()),
            },
            now(),
        )
        .unwrap();

        assert_eq!(list_entries(&store, "u", None).unwrap().len(), 2);
        let expenses = list_entries(&store, "u", Some(KindFilter::Expense)).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].date, now());
        assert!(list_entries(&store, "someone-else", None).unwrap().is_empty());

        delete_entry(&mut store, "u", &income.id).unwrap();
        assert!(delete_entry(&mut store, "u", &income.id).is_err());
        assert_eq!(list_entries(&store, "u", None).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_amount_rejected() {
        let mut store = MemoryStore::new();
        let err = add_expense(
            &mut store,
            "u",
            ExpenseCommand::Add {
                name: "Coffee".into(),
                amount: -5.0,
                category: "Coffee Shops".into(),
                date: None,
                notes: None,
            },
            now(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("positive"));
        assert!(store.all().unwrap().is_empty());
    }

    #[test]
    fn test_breakdown_text() {
        let mut store = MemoryStore::new();
        for (name, amt, cat) in [("Rent", 750.0, "Rent / Mortgage"), ("Veg", 250.0, "Groceries")] {
            add_expense(
                &mut store,
                "u",
                ExpenseCommand::Add {
                    name: name.into(),
                    amount: amt,
                    category: cat.into(),
                    date: None,
                    notes: None,
                },
                now(),
            )
            .unwrap();
        }
        let text = render_breakdown(&store.all().unwrap());
        assert!(text.contains("Total expenses:    ₹1,000.00"));
        assert!(text.contains("Available balance: -₹1,000.00"));
        assert!(text.contains("Housing"));
        assert!(text.contains("75.0%"));
    }

    fn group_fixture() -> MemoryStore {
        let mut store = MemoryStore::new();
        for (name, amt, cat, date) in [
            ("Big Basket", 1200.0, "Groceries", "2024-02-10"),
            ("Rent", 18000.0, "Rent / Mortgage", "2024-02-01"),
            ("Filter coffee", 80.0, "Coffee Shops", "2024-02-12"),
        ] {
            add_expense(
                &mut store,
                "u",
                ExpenseCommand::Add {
                    name: name.into(),
                    amount: amt,
                    category: cat.into(),
                    date: Some(date.into()),
                    notes: None,
                },
                now(),
            )
            .unwrap();
        }
        store
    }

    #[test]
    fn test_group_listing() {
        let entries = group_fixture().all().unwrap();
        let food = expenses_for_group(&entries, "food").unwrap();
        let text = render_group(&food);
        assert!(text.starts_with("Food Expenses\nTotal Spent in Food: ₹1,280.00\n"));
        assert!(text.contains("12 Feb 2024"));
        assert!(text.contains("Big Basket"));
        assert!(!text.contains("Rent"));

        let fun = expenses_for_group(&entries, "Entertainment").unwrap();
        assert!(render_group(&fun).contains("No expenses recorded in Entertainment yet."));

        let err = expenses_for_group(&entries, "Groceries").unwrap_err();
        assert!(err.to_string().contains("unknown category group 'Groceries'"));
    }

    #[test]
    fn test_group_receipt() {
        let entries = group_fixture().all().unwrap();
        let housing = expenses_for_group(&entries, "housing").unwrap();
        let receipt = render_receipt(&housing, "default_user", now());
        let lines: Vec<_> = receipt.lines().collect();
        assert_eq!(lines[0], "Housing Expenses Receipt");
        assert_eq!(lines[1], "User: default_user");
        assert_eq!(lines[2], "Date Generated: March 1, 2024 12:00 PM");
        assert_eq!(lines[4], "Date       | Expense Name         | Detailed Category    | Amount (₹)");
        assert_eq!(
            lines[6],
            "2024-02-01 | Rent                 | Rent / Mortgage      |   ₹18,000.00"
        );
        assert_eq!(lines.len(), 9);
        assert!(lines[8].starts_with("Total for Housing: "));
        assert!(lines[8].ends_with(" ₹18,000.00"));
    }

    #[test]
    fn test_categories_listing() {
        let text = render_categories();
        assert!(text.contains("- Earned Income"));
        assert!(text.contains("Debt Payments:"));
        assert!(text.contains("  - Video Games"));
    }
}
