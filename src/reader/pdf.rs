// src/reader/pdf.rs
use std::path::Path;

use lopdf::Document;

use crate::reader::models::{DocumentSummary, JournalPages};
use crate::utils::error::ReadError;

/// Opens the journal PDF and extracts the text of every page.
///
/// Failure to open or decode the document at all is fatal and surfaces as
/// [`ReadError`]. A page whose text cannot be extracted is logged and
/// recorded as `None`; it must not abort processing of the remaining
/// pages.
pub fn read_journal(path: &Path) -> Result<JournalPages, ReadError> {
    tracing::info!("Opening journal document: {}", path.display());

    let document = Document::load(path)?;
    let pages = document.get_pages();
    tracing::debug!("Document reports {} pages", pages.len());

    let mut texts = Vec::with_capacity(pages.len());
    for (page_number, _object_id) in pages {
        match document.extract_text(&[page_number]) {
            Ok(text) => texts.push(Some(text)),
            Err(e) => {
                tracing::warn!("Failed to extract text from page {}: {}", page_number, e);
                texts.push(None);
            }
        }
    }

    let summary = DocumentSummary {
        source: path.to_path_buf(),
        page_count: texts.len(),
        pages_with_text: texts.iter().filter(|t| t.is_some()).count(),
    };
    tracing::info!(
        "Extracted text from {}/{} pages of {}",
        summary.pages_with_text,
        summary.page_count,
        path.display()
    );

    Ok(JournalPages { summary, texts })
}
