//! budget-ingest: bank/UPI statement import (PDF text extraction and the
//! date-anchored statement text parser).

pub mod types;
pub mod parsers;
pub mod pdf;

pub use types::{ParsedTransaction, TxnType};
pub use parsers::parse_statement_text;
pub use pdf::{extract_pdf_text, PdfTextError};
