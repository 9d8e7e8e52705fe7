// src/reader/models.rs
use serde::Serialize;
use std::path::PathBuf;

/// What the reader learned about a journal document, for logging and the
/// run metadata file.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub source: PathBuf,
    pub page_count: usize,
    pub pages_with_text: usize,
}

/// A decoded journal: the document summary plus one optional text per
/// page, in page order. `None` marks a page whose text extraction failed;
/// the engine skips such pages without aborting the run.
#[derive(Debug)]
pub struct JournalPages {
    pub summary: DocumentSummary,
    pub texts: Vec<Option<String>>,
}
