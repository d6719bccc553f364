//! PDF-to-text step feeding the statement parser.
//!
//! Only text-layer PDFs are supported; scanned statements come back empty.

use std::path::Path;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PdfTextError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("extracting text from {path}: {message}")]
    Extract { path: String, message: String },
}

/// Re-join page breaks as blank lines and trim the document.
pub fn normalize_pages(text: &str) -> String {
    text.split('\x0c')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n\n")
        .trim()
        .to_string()
}

/// Extract the full text of a statement PDF.
pub fn extract_pdf_text(path: impl AsRef<Path>) -> Result<String, PdfTextError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| PdfTextError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let raw = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| PdfTextError::Extract {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let text = normalize_pages(&raw);
    info!(path = %path.display(), chars = text.len(), "extracted statement text");
    Ok(text)
}
