use serde::{Deserialize, Serialize};

/// Direction of a statement row as printed by the bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxnType {
    Credit,
    Debit,
    #[default]
    Unknown,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Credit => "CREDIT",
            TxnType::Debit => "DEBIT",
            TxnType::Unknown => "UNKNOWN",
        }
    }
}

/// One transaction recovered from extracted statement text.
///
/// Only `raw_date` is guaranteed on records returned by the parser; every
/// other field is best-effort and `None` means the block did not carry it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_time: Option<String>,
    /// Display string for the preview; falls back to the raw text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_full_date: Option<String>,
    /// Lines of the block not claimed by `raw_date`/`raw_time`, in source order.
    pub transaction_details_raw: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_party: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utr_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_by: Option<String>,
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl ParsedTransaction {
    /// Records without a matched date are noise and never leave the parser.
    pub fn is_anchored(&self) -> bool {
        self.raw_date.as_deref().is_some_and(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_statement_field_names() {
        let txn = ParsedTransaction {
            raw_date: Some("Jan 5, 2024".to_string()),
            txn_type: TxnType::Debit,
            amount: Some(12.5),
            currency: Some("₹".to_string()),
            ..Default::default()
        };

        let v = serde_json::to_value(&txn).unwrap();
        assert_eq!(v["rawDate"], "Jan 5, 2024");
        assert_eq!(v["type"], "DEBIT");
        assert_eq!(v["amount"], 12.5);
        assert_eq!(v["transactionDetailsRaw"], serde_json::json!([]));
        assert!(v.get("rawTime").is_none());
        assert!(v.get("utrNo").is_none());
    }

    #[test]
    fn test_default_type_is_unknown() {
        let txn = ParsedTransaction::default();
        assert_eq!(txn.txn_type, TxnType::Unknown);
        assert!(!txn.is_anchored());
    }
}
