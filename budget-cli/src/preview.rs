//! Plain-text preview table for parsed statement transactions.

use budget_ingest::{ParsedTransaction, TxnType};

const HEADERS: [&str; 8] = [
    "Date & Time",
    "Transaction Party",
    "Transaction ID",
    "UTR No.",
    "Paid By",
    "Type",
    "Amount",
    "Raw Details Lines",
];

const MAX_CELL: usize = 32;
const DETAIL_LINES: usize = 3;

fn or_dash(v: Option<&str>) -> String {
    v.filter(|s| !s.is_empty()).unwrap_or("-").to_string()
}

fn amount_cell(t: &ParsedTransaction) -> String {
    match t.amount {
        Some(a) => format!("{}{:.2}", t.currency.as_deref().unwrap_or(""), a),
        None => "-".to_string(),
    }
}

/// First three detail lines joined with "; ", "..." when more exist.
pub fn details_cell(details: &[String]) -> String {
    if details.is_empty() {
        return "-".to_string();
    }
    let mut s = details
        .iter()
        .take(DETAIL_LINES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("; ");
    if details.len() > DETAIL_LINES {
        s.push_str("...");
    }
    s
}

pub fn preview_row(t: &ParsedTransaction) -> [String; 8] {
    let when = t
        .parsed_full_date
        .as_deref()
        .or(t.raw_date.as_deref())
        .unwrap_or("N/A")
        .to_string();
    let kind = match t.txn_type {
        TxnType::Unknown => "N/A".to_string(),
        k => k.as_str().to_string(),
    };
    [
        when,
        or_dash(t.transaction_party.as_deref()),
        or_dash(t.transaction_id.as_deref()),
        or_dash(t.utr_no.as_deref()),
        or_dash(t.paid_by.as_deref()),
        kind,
        amount_cell(t),
        details_cell(&t.transaction_details_raw),
    ]
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Render an aligned table, one row per transaction.
pub fn render_preview(txns: &[ParsedTransaction]) -> String {
    let rows: Vec<[String; 8]> = txns
        .iter()
        .map(|t| preview_row(t).map(|c| truncate(&c, MAX_CELL)))
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (c, w))| {
                let pad = w - c.chars().count();
                // amounts are right-aligned
                if i == 6 {
                    format!("{}{}", " ".repeat(pad), c)
                } else {
                    format!("{}{}", c, " ".repeat(pad))
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let mut out = line(&header[..]);
    out.push('\n');
    out.push_str(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    out.push('\n');
    for row in &rows {
        out.push_str(&line(&row[..]));
        out.push('\n');
    }
    out
}
