//! Per-block field extraction.
//!
//! Labeled lines are matched against an ordered rule table, first match wins:
//! party > transaction ID > UTR > paid-by. Lines that match no label are then
//! checked for a CREDIT/DEBIT token and a rupee amount.

use regex::Regex;
use tracing::debug;

use super::display_date::format_display_date;
use super::patterns::{
    amount_re, date_re, paid_by_re, party_re, time_re, transaction_id_re, type_re, utr_re,
};
use crate::types::{ParsedTransaction, TxnType};

/// A labeled-line rule: pattern with one capture group plus the field it fills.
pub struct LabelRule {
    pub name: &'static str,
    pub pattern: fn() -> &'static Regex,
    pub apply: fn(&mut ParsedTransaction, String),
}

impl LabelRule {
    /// Returns true (and sets the field) when the line carries this label.
    pub fn try_apply(&self, txn: &mut ParsedTransaction, line: &str) -> bool {
        match (self.pattern)().captures(line).and_then(|c| c.get(1)) {
            Some(m) => {
                (self.apply)(txn, m.as_str().trim().to_string());
                true
            }
            None => false,
        }
    }
}

pub static LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        name: "party",
        pattern: party_re,
        apply: |t, v| t.transaction_party = Some(v),
    },
    LabelRule {
        name: "transaction_id",
        pattern: transaction_id_re,
        apply: |t, v| t.transaction_id = Some(v),
    },
    LabelRule {
        name: "utr_no",
        pattern: utr_re,
        apply: |t, v| t.utr_no = Some(v),
    },
    LabelRule {
        name: "paid_by",
        pattern: paid_by_re,
        apply: |t, v| t.paid_by = Some(v),
    },
];

/// Apply the first matching label rule; returns its name.
pub fn apply_label_rules(txn: &mut ParsedTransaction, line: &str) -> Option<&'static str> {
    LABEL_RULES
        .iter()
        .find(|rule| rule.try_apply(txn, line))
        .map(|rule| rule.name)
}

/// CREDIT/DEBIT token, normalised to uppercase.
pub fn match_type(line: &str) -> Option<TxnType> {
    let caps = type_re().captures(line)?;
    match caps[1].to_ascii_uppercase().as_str() {
        "CREDIT" => Some(TxnType::Credit),
        "DEBIT" => Some(TxnType::Debit),
        _ => None,
    }
}

/// Currency symbol and amount with grouping commas removed.
pub fn match_amount(line: &str) -> Option<(String, f64)> {
    let caps = amount_re().captures(line)?;
    let amount: f64 = caps[2].replace(',', "").parse().ok()?;
    Some((caps[1].to_string(), amount))
}

fn non_blank_bounds(lines: &[&str]) -> Option<(usize, usize)> {
    let first = lines.iter().position(|l| !l.is_empty())?;
    let last = lines.iter().rposition(|l| !l.is_empty())?;
    Some((first, last))
}

/// Extract typed fields from one block of trimmed lines.
pub fn extract_block(lines: &[&str]) -> ParsedTransaction {
    let mut txn = ParsedTransaction::default();
    let Some((first, last)) = non_blank_bounds(lines) else {
        return txn;
    };

    let mut details: Vec<String> = Vec::new();
    let mut i = first;
    while i <= last {
        let line = lines[i];
        i += 1;

        if line.is_empty() {
            details.push(String::new());
            continue;
        }

        if txn.raw_date.is_none() {
            if let Some(m) = date_re().find(line) {
                txn.raw_date = Some(m.as_str().to_string());
                if let Some(t) = lines.get(i).and_then(|next| time_re().find(next)) {
                    txn.raw_time = Some(t.as_str().to_string());
                    i += 1;
                }
                continue;
            }
        }

        if apply_label_rules(&mut txn, line).is_some() {
            details.push(line.to_string());
            continue;
        }

        let kind = match_type(line);
        let amount = match_amount(line);
        if let Some(k) = kind {
            txn.txn_type = k;
        }
        if let Some((currency, value)) = &amount {
            txn.currency = Some(currency.clone());
            txn.amount = Some(*value);
        }

        // A line carrying both the type and the amount is only kept through
        // the typed fields.
        if !(kind.is_some() && amount.is_some()) {
            details.push(line.to_string());
        }
    }

    txn.transaction_details_raw = details;
    if let Some(date) = txn.raw_date.as_deref() {
        txn.parsed_full_date = Some(format_display_date(date, txn.raw_time.as_deref()));
    }

    debug!(
        raw_date = ?txn.raw_date,
        details = txn.transaction_details_raw.len(),
        "extracted statement block"
    );
    txn
}
