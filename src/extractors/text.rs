// src/extractors/text.rs
use scraper::ElementRef;

/// Collapses every whitespace run to a single space and trims the ends.
/// Returns `None` when nothing is left, so blank fields read as absent.
pub fn normalize(text: &str) -> Option<String> {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// All text beneath `element`, text nodes separated by a space so that
/// adjacent inline elements never glue words together.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

/// Normalized text content of an element, `None` if it is blank.
pub fn normalized_text(element: ElementRef<'_>) -> Option<String> {
    normalize(&element_text(element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("  Poster \n\t Session  1 ").as_deref(), Some("Poster Session 1"));
        assert_eq!(normalize("Hall\u{00A0}B").as_deref(), Some("Hall B"));
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize(" \n\t "), None);
    }

    #[test]
    fn element_text_separates_inline_children() {
        let doc = Html::parse_fragment("<div><b>Exhibit</b><i>Hall</i>\n  A</div>");
        let div = doc.select(&Selector::parse("div").unwrap()).next().unwrap();
        assert_eq!(normalized_text(div).as_deref(), Some("Exhibit Hall A"));
    }
}
