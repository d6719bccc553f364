//! UPI/wallet statement text parser.
//!
//! Two phases: `segmenter` cuts the text into date-anchored blocks and
//! `fields` pulls typed values out of each block.

pub mod display_date;
pub mod fields;
pub mod patterns;
pub mod segmenter;

use tracing::debug;

use crate::types::ParsedTransaction;

pub use display_date::{DisplayDateError, format_display_date, try_format_display_date};
pub use fields::{LABEL_RULES, LabelRule, apply_label_rules, extract_block};
pub use segmenter::{Block, Segmenter, segment};

/// Split statement text into trimmed lines, keeping blank ones.
pub fn prepare_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim)
}

/// Parse extracted statement text into transactions, in source order.
///
/// Never fails: text without a recognisable date yields an empty `Vec`.
pub fn parse_statement_text(text: &str) -> Vec<ParsedTransaction> {
    let blocks = segment(prepare_lines(text));
    let total = blocks.len();

    let out: Vec<ParsedTransaction> = blocks
        .iter()
        .map(|b| extract_block(&b.lines))
        .filter(ParsedTransaction::is_anchored)
        .collect();

    debug!(blocks = total, transactions = out.len(), "parsed statement text");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TxnType;

    #[test]
    fn test_parses_basic_rows() {
        let text = r#"
Transaction Statement for 98XXXXXX10
Date Transaction Details Type Amount
Jan 5, 2024
10:30 AM
Paid to Jane Doe
Transaction ID T240105103012
UTR No 401234567890
Paid by XXXXXX1234
DEBIT ₹1,250.50
Jan 7, 2024
08:15 PM
Received from Acme Payroll
Transaction ID T240107201501
CREDIT ₹45,000
"#;

        let txns = parse_statement_text(text);
        assert_eq!(txns.len(), 2);

        assert_eq!(txns[0].transaction_party.as_deref(), Some("Jane Doe"));
        assert_eq!(txns[0].paid_by.as_deref(), Some("XXXXXX1234"));
        assert_eq!(txns[0].txn_type, TxnType::Debit);
        assert_eq!(txns[0].amount, Some(1250.50));
        assert_eq!(txns[0].parsed_full_date.as_deref(), Some("5 Jan 2024, 10:30 am"));
        assert_eq!(txns[0].transaction_details_raw.len(), 4);

        assert_eq!(txns[1].transaction_party.as_deref(), Some("Acme Payroll"));
        assert_eq!(txns[1].txn_type, TxnType::Credit);
        assert_eq!(txns[1].amount, Some(45000.0));
        assert!(txns[1].utr_no.is_none());
    }

    #[test]
    fn test_crlf_and_indented_lines() {
        let text = "  Jan 5, 2024 \r\n  10:30 AM\r\n  Paid to Jane Doe  \r\n";
        let txns = parse_statement_text(text);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].raw_time.as_deref(), Some("10:30 AM"));
        assert_eq!(txns[0].transaction_details_raw, vec!["Paid to Jane Doe"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_statement_text("").is_empty());
    }
}
