use anyhow::{Context, Result};
use budget_ingest::{extract_pdf_text, parse_statement_text, ParsedTransaction};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::preview::render_preview;

pub const NO_TEXT_HINT: &str =
    "No text found. The PDF might be image-based or password-protected without text content.";

pub const NO_TRANSACTIONS_HINT: &str = "No transactions identified. Could not find distinct transaction entries based on the expected date pattern; the statement layout might be different or text extraction quality is low.";

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Statement text from a PDF, or the file itself when it is already text.
pub fn load_statement_text(path: &Path) -> Result<String> {
    if is_pdf(path) {
        Ok(extract_pdf_text(path)?)
    } else {
        let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Ok(s.trim().to_string())
    }
}

/// Parse a statement file for preview. Nothing is written to the ledger.
pub fn preview_statement(path: &Path) -> Result<(String, Vec<ParsedTransaction>)> {
    let text = load_statement_text(path)?;
    let txns = parse_statement_text(&text);
    info!(path = %path.display(), transactions = txns.len(), "parsed statement");
    Ok((text, txns))
}

/// Text printed for `budget import`.
pub fn render_import(text: &str, txns: &[ParsedTransaction], json: bool, limit: Option<usize>) -> Result<String> {
    if text.is_empty() {
        return Ok(format!("{NO_TEXT_HINT}\n"));
    }
    if txns.is_empty() {
        return Ok(format!("{NO_TRANSACTIONS_HINT}\n"));
    }

    let shown = &txns[..limit.unwrap_or(txns.len()).min(txns.len())];
    if json {
        let mut s = serde_json::to_string_pretty(shown).context("serialize parsed transactions")?;
        s.push('\n');
        return Ok(s);
    }

    let mut s = format!(
        "Found {} potential transaction entries. Review them before importing anything.\n\n",
        txns.len()
    );
    s.push_str(&render_preview(shown));
    if shown.len() < txns.len() {
        s.push_str(&format!("... {} more not shown\n", txns.len() - shown.len()));
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATEMENT: &str = "Transaction Statement\nJan 5, 2024\n10:30 AM\nPaid to Jane Doe\nDEBIT ₹1,250.50\nJan 6, 2024\nReceived from Bob\nCREDIT ₹300\n";

    #[test]
    fn test_text_file_preview() {
        let dir = tempfile::TempDir::new().unwrap();
        let p = dir.path().join("statement.txt");
        fs::write(&p, STATEMENT).unwrap();

        let (text, txns) = preview_statement(&p).unwrap();
        assert_eq!(txns.len(), 2);

        let out = render_import(&text, &txns, false, Some(1)).unwrap();
        assert!(out.starts_with("Found 2 potential transaction entries."));
        assert!(out.contains("Jane Doe"));
        assert!(!out.contains("| Bob"));
        assert!(out.ends_with("... 1 more not shown\n"));
    }

    #[test]
    fn test_json_output() {
        let txns = parse_statement_text(STATEMENT);
        let out = render_import(STATEMENT, &txns, true, None).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 2);
        assert_eq!(v[1]["type"], "CREDIT");
        assert_eq!(v[1]["amount"], 300.0);
    }

    #[test]
    fn test_empty_results_give_hints() {
        assert_eq!(render_import("", &[], false, None).unwrap(), format!("{NO_TEXT_HINT}\n"));
        assert_eq!(
            render_import("just words", &[], true, None).unwrap(),
            format!("{NO_TRANSACTIONS_HINT}\n")
        );
    }

    #[test]
    fn test_pdf_extension_detection() {
        assert!(is_pdf(Path::new("x/Statement.PDF")));
        assert!(!is_pdf(Path::new("x/statement.txt")));
        assert!(!is_pdf(Path::new("x/pdf")));
    }
}
