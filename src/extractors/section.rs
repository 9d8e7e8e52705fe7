// src/extractors/section.rs

// --- Imports ---
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// --- Section marker phrases ---
// Matched as case-sensitive substrings of the stripped line, not full-line
// equality: journal pages pad headings with running numbers and dates.
pub const CORRIGENDA_MARKER: &str = "CORRIGENDA";
pub const REGISTERED_MARKER: &str = "Following Trade Mark applications have been Registered";
pub const RENEWED_MARKER: &str = "Following Trade Marks Registration Renewed";

// --- Data Structures ---

/// The four fixed identifier classes published in a journal issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Advertisement,
    Corrigenda,
    Rc,
    Renewal,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Advertisement,
        Category::Corrigenda,
        Category::Rc,
        Category::Renewal,
    ];

    /// Human-facing label, as printed in logs and metadata.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Advertisement => "Advertisement",
            Category::Corrigenda => "Corrigenda",
            Category::Rc => "RC",
            Category::Renewal => "Renewal",
        }
    }

    /// Lowercase stem used for output filenames.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Category::Advertisement => "advertisement",
            Category::Corrigenda => "corrigenda",
            Category::Rc => "rc",
            Category::Renewal => "renewal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How far section tracking state survives.
///
/// `Document` threads one tracker through the whole page sequence, so a
/// section opened on page N stays open on page N+1 until its closing
/// marker appears. `Page` re-initializes the tracker at every page
/// boundary, for documents whose sections are known to be page-contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionScope {
    #[default]
    Document,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowState {
    Pending,
    Active,
    Closed,
}

/// One category's view of the scan: a window over the line sequence with
/// its own begin/end rule. The four windows advance independently over the
/// same lines; a single line can sit inside several windows at once.
#[derive(Debug, Clone)]
struct SectionWindow {
    category: Category,
    state: WindowState,
    opens_at: Option<&'static str>,
    closes_at: Option<&'static str>,
}

impl SectionWindow {
    fn new(category: Category) -> Self {
        let (state, opens_at, closes_at) = match category {
            // Advertisement listings run from the top of the scan until the
            // corrigenda heading.
            Category::Advertisement => (WindowState::Active, None, Some(CORRIGENDA_MARKER)),
            Category::Corrigenda => (
                WindowState::Pending,
                Some(CORRIGENDA_MARKER),
                Some(REGISTERED_MARKER),
            ),
            // RC tables likewise run from the top until the renewal heading.
            Category::Rc => (WindowState::Active, None, Some(RENEWED_MARKER)),
            Category::Renewal => (WindowState::Pending, Some(RENEWED_MARKER), None),
        };
        Self {
            category,
            state,
            opens_at,
            closes_at,
        }
    }

    fn all() -> [SectionWindow; 4] {
        Category::ALL.map(SectionWindow::new)
    }

    /// Advances the window past `line` and reports whether the line falls
    /// inside it and should be pattern-matched. A line that transitions the
    /// window is consumed as a delimiter and never matched; transitions are
    /// monotonic, so a closed window stays closed for the rest of the scan.
    fn admit(&mut self, line: &str) -> bool {
        match self.state {
            WindowState::Pending => {
                if self.opens_at.is_some_and(|marker| line.contains(marker)) {
                    tracing::debug!("{} section opened by marker line", self.category);
                    self.state = WindowState::Active;
                }
                false
            }
            WindowState::Active => {
                if self.closes_at.is_some_and(|marker| line.contains(marker)) {
                    tracing::debug!("{} section closed by marker line", self.category);
                    self.state = WindowState::Closed;
                    return false;
                }
                true
            }
            WindowState::Closed => false,
        }
    }
}

/// Raw per-page match lists, one per category, duplicates preserved.
#[derive(Debug, Default)]
struct PageMatches {
    raw: BTreeMap<Category, Vec<u64>>,
}

impl PageMatches {
    fn record(&mut self, category: Category, value: u64) {
        self.raw.entry(category).or_default().push(value);
    }

    fn total(&self) -> usize {
        self.raw.values().map(Vec::len).sum()
    }
}

/// The final, deduplicated output of one extraction run. Every category is
/// present; a category with no candidates carries an empty slice, which
/// signals absence, not failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    numbers: BTreeMap<Category, Vec<u64>>,
}

impl ResultSet {
    /// The unique, ascending numbers extracted for `category`.
    pub fn numbers(&self, category: Category) -> &[u64] {
        self.numbers
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True when every category came up empty.
    pub fn is_empty(&self) -> bool {
        self.numbers.values().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[u64])> {
        self.numbers
            .iter()
            .map(|(category, values)| (*category, values.as_slice()))
    }
}

// --- Main Extractor Structure ---

/// Section-aware extraction engine: drives the four section windows and
/// the per-category pattern rules over every line of every page, then
/// merges the per-page results into one [`ResultSet`].
#[derive(Debug, Default)]
pub struct JournalExtractor {
    scope: SectionScope,
}

impl JournalExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(scope: SectionScope) -> Self {
        Self { scope }
    }

    /// The sole public entry point of the engine. Takes one optional text
    /// per page (`None` marks a page whose text could not be obtained and
    /// contributes nothing) and returns the merged, deduplicated,
    /// ascending per-category result. Deterministic for identical input.
    pub fn extract_all<I, S>(&self, pages: I) -> ResultSet
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let mut windows = SectionWindow::all();
        let mut per_page = Vec::new();

        for (index, page) in pages.into_iter().enumerate() {
            let Some(text) = page else {
                tracing::warn!("Page {} yielded no text, skipping", index + 1);
                continue;
            };
            if self.scope == SectionScope::Page {
                windows = SectionWindow::all();
            }
            let matches = scan_page(&mut windows, text.as_ref());
            tracing::debug!("Page {}: {} raw candidates", index + 1, matches.total());
            per_page.push(matches);
        }

        aggregate(per_page)
    }
}

/// Runs the four window scans over one page's lines and collects that
/// page's raw per-category match lists.
fn scan_page(windows: &mut [SectionWindow; 4], text: &str) -> PageMatches {
    let mut matches = PageMatches::default();
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        for window in windows.iter_mut() {
            if window.admit(line) {
                for value in window.category.candidates_in(line) {
                    matches.record(window.category, value);
                }
            }
        }
    }
    matches
}

/// Merges per-page raw lists across the document: dedup by numeric value,
/// ascending order. Input page order is immaterial to the output.
fn aggregate(pages: Vec<PageMatches>) -> ResultSet {
    let mut buckets: BTreeMap<Category, BTreeSet<u64>> = Category::ALL
        .into_iter()
        .map(|category| (category, BTreeSet::new()))
        .collect();

    for page in pages {
        for (category, values) in page.raw {
            buckets.entry(category).or_default().extend(values);
        }
    }

    ResultSet {
        numbers: buckets
            .into_iter()
            .map(|(category, set)| (category, set.into_iter().collect()))
            .collect(),
    }
}
