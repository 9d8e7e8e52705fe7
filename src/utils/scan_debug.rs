// src/utils/scan_debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::section::{CORRIGENDA_MARKER, REGISTERED_MARKER, RENEWED_MARKER};
use crate::utils::error::AppError;

// Digit runs long enough to be candidate numbers, wherever they sit.
static LONG_DIGIT_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{5,}\b").expect("Failed to compile LONG_DIGIT_RUN_RE"));

/// Annotates one line of page text with the section markers it contains
/// and the number of long digit runs on it. Empty result means the line is
/// inert for every scan.
fn line_tags(line: &str) -> Vec<String> {
    let mut tags = Vec::new();

    let markers = [
        (CORRIGENDA_MARKER, "corrigenda-open"),
        (REGISTERED_MARKER, "corrigenda-close"),
        (RENEWED_MARKER, "renewal-open"),
    ];
    for (marker, tag) in markers {
        if line.contains(marker) {
            tags.push(format!("marker:{}", tag));
        }
    }

    let digit_runs = LONG_DIGIT_RUN_RE.find_iter(line).count();
    if digit_runs > 0 {
        tags.push(format!("digits:{}", digit_runs));
    }

    tags
}

/// Saves an annotated copy of one page's text for debugging: every line is
/// prefixed with the marker/digit tags that explain why the scan would or
/// would not consider it. Mirrors the page text line-for-line so the dump
/// can be diffed against extraction results by eye.
pub fn save_scan_dump(text: &str, page_number: usize, path: &Path) -> Result<(), AppError> {
    let mut dump = format!("=== scan dump: page {} ===\n", page_number);

    for raw_line in text.lines() {
        let line = raw_line.trim();
        let tags = line_tags(line);
        if tags.is_empty() {
            dump.push_str(&format!("{:>28} | {}\n", "", line));
        } else {
            dump.push_str(&format!("{:>28} | {}\n", tags.join(","), line));
        }
    }

    let mut file = File::create(path)?;
    file.write_all(dump.as_bytes())?;

    tracing::info!("Saved scan dump to {}", path.display());
    Ok(())
}
