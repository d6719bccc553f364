//! Compiled line patterns shared by the segmenter and the field rules.
//!
//! Expected shape of a UPI/wallet statement after PDF-to-text:
//!   Jan 5, 2024
//!   10:30 AM
//!   Paid to Jane Doe
//!   Transaction ID TXN123
//!   UTR No UTR456
//!   Paid by XXXXXX1234
//!   DEBIT
//!   ₹1,250.50

use regex::Regex;
use std::sync::OnceLock;

/// "Jan 5, 2024" anywhere in the line. Digits and word boundaries are ASCII
/// only, so "Jan ५, २०२४" is not a date and "Jan 5, 2024é" still is.
pub fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?-u:\b)(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+[0-9]{1,2},\s+[0-9]{4}(?-u:\b)",
        )
            .expect("date regex")
    })
}

/// "10:30 AM", 12-hour clock.
pub fn time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)[0-9]{1,2}:[0-9]{2}\s+(?:AM|PM)").expect("time regex"))
}

pub fn party_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:Paid to|Received from)\s*[:\-\s]*(.+)").expect("party regex")
    })
}

pub fn transaction_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Transaction ID\s*[:\-\s]*(\S+)").expect("transaction id regex"))
}

pub fn utr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)UTR No\.?\s*[:\-\s]*(\S+)").expect("utr regex"))
}

pub fn paid_by_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Paid by\s*[:\-\s]*(.+)").expect("paid by regex"))
}

pub fn type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?-u:\b)(CREDIT|DEBIT)(?-u:\b)").expect("type regex"))
}

/// Rupee-prefixed amount with any digit grouping: "₹12,34,567.89".
pub fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(₹)\s*([0-9,]+\.?[0-9]*)").expect("amount regex"))
}
