// src/extractors/patterns.rs

// --- Imports ---
use crate::extractors::Category;
use once_cell::sync::Lazy;
use regex::Regex;

// --- Constants ---
// Journal application numbers are at least five digits long; shorter runs
// are page numbers, dates, or column indices.
const MIN_CANDIDATE_DIGITS: usize = 5;
// RC tables print exactly five registration numbers per row.
const RC_COLUMN_COUNT: usize = 5;

// --- Regex Patterns for Text Matching (Lazy Static) ---
// A whole token of the exact form DD/MM/YYYY, as printed in the
// advertisement listings next to each application number.
static DATE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("Failed to compile DATE_TOKEN_RE")
});

// Renewal entries sometimes carry the number inline after a label instead
// of as a standalone column, e.g. "Application No: 1234567".
static APPLICATION_NO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Application No[\s:]+(\d{5,})").expect("Failed to compile APPLICATION_NO_RE")
});

impl Category {
    /// Applies this category's line rule and returns the candidate numbers
    /// the line yields. Stateless; section activity is the caller's concern.
    pub fn candidates_in(self, line: &str) -> Vec<u64> {
        match self {
            Category::Advertisement => advertisement_candidates(line),
            Category::Corrigenda => standalone_number_candidates(line),
            Category::Rc => rc_row_candidates(line),
            Category::Renewal => renewal_candidates(line),
        }
    }
}

/// A run of >=5 digits whose next whitespace-separated token is a
/// DD/MM/YYYY date. A line may yield several such pairs.
fn advertisement_candidates(line: &str) -> Vec<u64> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut candidates = Vec::new();
    for pair in tokens.windows(2) {
        if is_long_digit_run(pair[0]) && DATE_TOKEN_RE.is_match(pair[1]) {
            candidates.extend(parse_candidate(pair[0]));
        }
    }
    candidates
}

/// Any standalone run of >=5 digits bounded by whitespace or line edges.
/// Shared by the Corrigenda rule and the generic half of the Renewal rule.
fn standalone_number_candidates(line: &str) -> Vec<u64> {
    line.split_whitespace()
        .filter(|token| is_long_digit_run(token))
        .filter_map(parse_candidate)
        .collect()
}

/// RC rows are five whitespace-separated columns, every one purely numeric.
/// Anything else on the line (a header, a name, a date) disqualifies it.
fn rc_row_candidates(line: &str) -> Vec<u64> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    if columns.len() != RC_COLUMN_COUNT || !columns.iter().all(|col| is_digit_run(col)) {
        return Vec::new();
    }
    columns.into_iter().filter_map(parse_candidate).collect()
}

/// Standalone digit runs plus the "Application No" label form. The label
/// form can re-yield a number the generic rule already caught; the
/// aggregator deduplicates downstream.
fn renewal_candidates(line: &str) -> Vec<u64> {
    let mut candidates = standalone_number_candidates(line);
    for caps in APPLICATION_NO_RE.captures_iter(line) {
        candidates.extend(parse_candidate(&caps[1]));
    }
    candidates
}

fn is_digit_run(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_long_digit_run(token: &str) -> bool {
    token.len() >= MIN_CANDIDATE_DIGITS && is_digit_run(token)
}

/// Converts a matched digit run to a number. The patterns only ever hand us
/// ASCII digits, so the sole failure mode is u64 overflow on a pathological
/// run; such candidates are dropped, never fatal to the scan.
fn parse_candidate<S: AsRef<str>>(token: S) -> Option<u64> {
    match token.as_ref().parse::<u64>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Dropping malformed candidate '{}': {}", token.as_ref(), e);
            None
        }
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advertisement_number_followed_by_date() {
        let found = advertisement_candidates("54321   15/03/2021");
        assert_eq!(found, vec![54321]);
    }

    #[test]
    fn advertisement_line_with_two_entries_yields_both() {
        let found = advertisement_candidates("12345 01/01/2020 67890 02/02/2020");
        assert_eq!(found, vec![12345, 67890]);
    }

    #[test]
    fn advertisement_requires_the_date_token() {
        assert!(advertisement_candidates("54321 registered earlier").is_empty());
        // Malformed date (single-digit day) does not qualify.
        assert!(advertisement_candidates("54321 1/03/2021").is_empty());
    }

    #[test]
    fn advertisement_requires_five_digits() {
        assert!(advertisement_candidates("4321 15/03/2021").is_empty());
    }

    #[test]
    fn corrigenda_matches_any_long_digit_run() {
        let found = standalone_number_candidates("see 98765 and also 1234567 herein");
        assert_eq!(found, vec![98765, 1234567]);
    }

    #[test]
    fn corrigenda_ignores_short_runs_and_mixed_tokens() {
        assert!(standalone_number_candidates("page 42 of 9999").is_empty());
        assert!(standalone_number_candidates("ref-12345 12345/A").is_empty());
    }

    #[test]
    fn rc_row_of_five_numeric_columns() {
        let found = rc_row_candidates("11111 22222 33333 44444 55555");
        assert_eq!(found, vec![11111, 22222, 33333, 44444, 55555]);
    }

    #[test]
    fn rc_rejects_wrong_column_counts() {
        assert!(rc_row_candidates("11111 22222 33333 44444").is_empty());
        assert!(rc_row_candidates("11111 22222 33333 44444 55555 66666").is_empty());
    }

    #[test]
    fn rc_rejects_non_numeric_columns() {
        assert!(rc_row_candidates("11111 22222 33333 44444 ACME").is_empty());
        assert!(rc_row_candidates("11111 22222 33333 44444 5555x").is_empty());
    }

    #[test]
    fn renewal_label_form_is_matched() {
        let found = renewal_candidates("Application No: 77777");
        // Caught by both the generic digit-run rule and the label rule; the
        // aggregator is responsible for deduplication.
        assert_eq!(found, vec![77777, 77777]);
    }

    #[test]
    fn renewal_label_form_without_colon() {
        let found = renewal_candidates("Application No 1234567 renewed");
        assert_eq!(found, vec![1234567, 1234567]);
    }

    #[test]
    fn renewal_generic_rule_alone() {
        let found = renewal_candidates("renewed under 55555 on request");
        assert_eq!(found, vec![55555]);
    }

    #[test]
    fn overflowing_digit_run_is_dropped() {
        // 25 digits overflows u64; the candidate vanishes silently.
        assert!(standalone_number_candidates("1111111111111111111111111").is_empty());
    }

    #[test]
    fn category_dispatch_routes_to_the_right_rule() {
        let line = "11111 22222 33333 44444 55555";
        assert_eq!(Category::Rc.candidates_in(line).len(), 5);
        assert_eq!(Category::Corrigenda.candidates_in(line).len(), 5);
        assert!(Category::Advertisement.candidates_in(line).is_empty());
    }
}
