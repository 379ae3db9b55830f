// src/extractors/rules.rs
//
// Field extraction rules for one row of the accepted-papers table.
// Each rule looks at the row's cells and returns an optional value; the
// extractor applies them in a fixed order and only the title rule may
// reject a row.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

use super::text::{normalize, normalized_text};

// --- CSS Selectors (Lazy Static) ---
static CELL_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("td").expect("Failed to compile CELL_SELECTOR")
});

// Hyperlink or bold container, whichever comes first in document order
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a, strong, b").expect("Failed to compile TITLE_SELECTOR")
});

static LINE_BREAK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("br").expect("Failed to compile LINE_BREAK_SELECTOR")
});

static AUTHOR_BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.indented").expect("Failed to compile AUTHOR_BLOCK_SELECTOR")
});

static IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("img").expect("Failed to compile IMAGE_SELECTOR")
});

// Latin-1 middle dot plus the bullet and dot operators seen in pasted author lists
static AUTHOR_SEPARATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x{00B7}\x{2219}\x{22C5}]+").expect("Failed to compile AUTHOR_SEPARATOR_RE")
});

/// Badge keywords, matched against the lower-cased image title.
const HIGHLIGHT_KEYWORDS: [&str; 2] = ["highlight", "award"];

/// Index of the column holding the presentation location.
pub const LOCATION_COLUMN: usize = 2;

/// The `<td>` cells of one table row, in document order.
#[derive(Debug, Clone)]
pub struct RowCells<'a> {
    cells: Vec<ElementRef<'a>>,
}

impl<'a> RowCells<'a> {
    /// Collects the cells of `row`. Rows without cells (header rows using
    /// `<th>`, spacer rows) yield `None`.
    pub fn from_row(row: ElementRef<'a>) -> Option<Self> {
        let cells: Vec<_> = row.select(&CELL_SELECTOR).collect();
        if cells.is_empty() {
            None
        } else {
            Some(Self { cells })
        }
    }

    pub fn first(&self) -> ElementRef<'a> {
        self.cells[0]
    }

    pub fn get(&self, index: usize) -> Option<ElementRef<'a>> {
        self.cells.get(index).copied()
    }

    /// The element carrying the paper title inside the first cell.
    pub fn title_element(&self) -> Option<ElementRef<'a>> {
        self.first().select(&TITLE_SELECTOR).next()
    }
}

/// A named heuristic pulling one field out of a row.
pub trait FieldRule {
    type Value;

    /// Field name, used in trace logs.
    fn field(&self) -> &'static str;

    fn apply(&self, row: &RowCells<'_>) -> Option<Self::Value>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleField {
    pub title: String,
    pub link: Option<String>,
}

/// Title text and link from the first anchor or bold element of the first cell.
pub struct TitleRule;

impl FieldRule for TitleRule {
    type Value = TitleField;

    fn field(&self) -> &'static str {
        "title"
    }

    fn apply(&self, row: &RowCells<'_>) -> Option<TitleField> {
        let element = row.title_element()?;
        let title = normalized_text(element)?;
        let link = if element.value().name() == "a" {
            element.value().attr("href").and_then(normalize)
        } else {
            None
        };
        Some(TitleField { title, link })
    }
}

/// Session label: loose text next to the first `<br>` of the first cell.
///
/// Preceding siblings are scanned nearest first and the first non-empty text
/// wins. The title element (or the sibling wrapping it) is never taken as the
/// session. When nothing before the marker qualifies, the loose text right
/// after it is used, up to the next element.
pub struct SessionRule;

impl FieldRule for SessionRule {
    type Value = String;

    fn field(&self) -> &'static str {
        "session"
    }

    fn apply(&self, row: &RowCells<'_>) -> Option<String> {
        let marker = row.first().select(&LINE_BREAK_SELECTOR).next()?;

        let mut title_chain = Vec::new();
        if let Some(title) = row.title_element() {
            title_chain.push(title.id());
            title_chain.extend(title.ancestors().map(|node| node.id()));
        }

        // Materialized nearest-first, so the scan below walks backwards
        let preceding: Vec<Option<String>> = marker
            .prev_siblings()
            .filter(|node| !title_chain.contains(&node.id()))
            .map(|node| {
                if let Some(text) = node.value().as_text() {
                    normalize(text)
                } else {
                    ElementRef::wrap(node).and_then(normalized_text)
                }
            })
            .collect();

        if let Some(session) = preceding.into_iter().flatten().next() {
            return Some(session);
        }

        marker
            .next_siblings()
            .take_while(|node| !node.value().is_element())
            .filter_map(|node| node.value().as_text().and_then(|text| normalize(text)))
            .next()
    }
}

/// Author names from the indented block, split on middle dots.
pub struct AuthorsRule;

impl FieldRule for AuthorsRule {
    type Value = Vec<String>;

    fn field(&self) -> &'static str {
        "authors"
    }

    fn apply(&self, row: &RowCells<'_>) -> Option<Vec<String>> {
        let block = row.first().select(&AUTHOR_BLOCK_SELECTOR).next()?;
        let text = super::text::element_text(block);
        let authors: Vec<String> = AUTHOR_SEPARATOR_RE
            .split(&text)
            .filter_map(normalize)
            .collect();
        Some(authors)
    }
}

/// Normalized text of the location column, when the row has one.
pub struct LocationRule;

impl FieldRule for LocationRule {
    type Value = String;

    fn field(&self) -> &'static str {
        "location"
    }

    fn apply(&self, row: &RowCells<'_>) -> Option<String> {
        row.get(LOCATION_COLUMN).and_then(normalized_text)
    }
}

/// Award or highlight badge: an image in the first cell whose title (or alt
/// text) mentions one of the badge keywords. Yields the matching badge text.
pub struct HighlightRule;

impl FieldRule for HighlightRule {
    type Value = String;

    fn field(&self) -> &'static str {
        "highlight"
    }

    fn apply(&self, row: &RowCells<'_>) -> Option<String> {
        row.first().select(&IMAGE_SELECTOR).find_map(|img| {
            let label = img
                .value()
                .attr("title")
                .or_else(|| img.value().attr("alt"))?;
            let lowered = label.to_lowercase();
            if HIGHLIGHT_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
                normalize(label)
            } else {
                None
            }
        })
    }
}
