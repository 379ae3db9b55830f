// src/extractors/paper.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use super::rules::{
    AuthorsRule, FieldRule, HighlightRule, LocationRule, RowCells, SessionRule, TitleRule,
};
use super::text::normalize;

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table tr").expect("Failed to compile ROW_SELECTOR")
});

// --- Data Structures ---

/// One accepted paper as listed on the conference page.
///
/// Text fields are whitespace-normalized and never blank: a missing or blank
/// value is `None`. Field order here is the key order of the JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperEntry {
    title: String,
    link: Option<String>,
    session: Option<String>,
    authors: Vec<String>,
    location: Option<String>,
    highlight: bool,
}

impl PaperEntry {
    /// Builds an entry, normalizing every text field. Returns `None` when the
    /// title is blank.
    pub fn new(
        title: &str,
        link: Option<&str>,
        session: Option<&str>,
        authors: &[&str],
        location: Option<&str>,
        highlight: bool,
    ) -> Option<Self> {
        Some(Self {
            title: normalize(title)?,
            link: link.and_then(normalize),
            session: session.and_then(normalize),
            authors: authors.iter().copied().filter_map(normalize).collect(),
            location: location.and_then(normalize),
            highlight,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn highlight(&self) -> bool {
        self.highlight
    }
}

// --- Extractor ---

/// Turns the accepted-papers listing into `PaperEntry` records.
///
/// Rows that do not look like a paper (no cells, no title) are skipped
/// without error; the page is not a data interchange format and partial rows
/// are expected.
#[derive(Debug, Default)]
pub struct PaperExtractor;

impl PaperExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Parses the whole document and extracts every recognizable row, in
    /// document order. Malformed markup degrades to fewer (or zero) records.
    pub fn parse_papers(&self, html_content: &str) -> Vec<PaperEntry> {
        let document = Html::parse_document(html_content);

        let mut rows_seen = 0usize;
        let papers: Vec<PaperEntry> = document
            .select(&ROW_SELECTOR)
            .inspect(|_| rows_seen += 1)
            .filter_map(|row| self.extract_row(row))
            .collect();

        tracing::debug!("Extracted {} papers from {} table rows", papers.len(), rows_seen);
        papers
    }

    /// Applies the field rules to one `<tr>`. Only a missing title rejects
    /// the row; every other field degrades to absent.
    pub fn extract_row(&self, row: ElementRef<'_>) -> Option<PaperEntry> {
        let Some(cells) = RowCells::from_row(row) else {
            tracing::trace!("Skipping row without cells");
            return None;
        };

        let Some(title) = TitleRule.apply(&cells) else {
            tracing::trace!(
                "Skipping row: no {} in first cell: '{}'",
                TitleRule.field(),
                cells.first().text().collect::<String>().trim()
            );
            return None;
        };

        let session = SessionRule.apply(&cells);
        let authors = AuthorsRule.apply(&cells).unwrap_or_default();
        let location = LocationRule.apply(&cells);
        let highlight = HighlightRule.apply(&cells);

        if let Some(badge) = &highlight {
            tracing::trace!("'{}' carries {} badge '{}'", title.title, HighlightRule.field(), badge);
        }
        if authors.is_empty() {
            tracing::trace!("'{}' has no {}", title.title, AuthorsRule.field());
        }

        // Rules already hand back normalized, non-blank values
        Some(PaperEntry {
            title: title.title,
            link: title.link,
            session,
            authors,
            location,
            highlight: highlight.is_some(),
        })
    }
}
