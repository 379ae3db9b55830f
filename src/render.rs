// src/render.rs
use std::io::{self, Write};

use crate::extractors::PaperEntry;

/// Writes a numbered, human-readable block per paper. Absent fields are
/// left out rather than shown blank.
pub fn render_papers<W: Write>(papers: &[PaperEntry], out: &mut W) -> io::Result<()> {
    for (idx, paper) in papers.iter().enumerate() {
        writeln!(out, "{}. {}", idx + 1, paper.title())?;
        if let Some(link) = paper.link() {
            writeln!(out, "   URL: {}", link)?;
        }
        if let Some(session) = paper.session() {
            writeln!(out, "   Session: {}", session)?;
        }
        if let Some(location) = paper.location() {
            writeln!(out, "   Location: {}", location)?;
        }
        if !paper.authors().is_empty() {
            writeln!(out, "   Authors: {}", paper.authors().join(", "))?;
        }
        if paper.highlight() {
            writeln!(out, "   ⭐ Highlighted")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(papers: &[PaperEntry]) -> String {
        let mut buf = Vec::new();
        render_papers(papers, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_present_fields_once() {
        let papers = vec![
            PaperEntry::new("Fast Nets", Some("/p/123"), Some("Oral"), &["A. One", "B. Two"], Some("Hall B"), true)
                .unwrap(),
        ];
        let text = render(&papers);
        assert_eq!(
            text,
            "1. Fast Nets\n   URL: /p/123\n   Session: Oral\n   Location: Hall B\n   Authors: A. One, B. Two\n   ⭐ Highlighted\n\n"
        );
    }

    #[test]
    fn omits_absent_fields_and_numbers_from_one() {
        let papers = vec![
            PaperEntry::new("First", None, None, &[], None, false).unwrap(),
            PaperEntry::new("Second", None, Some("Poster"), &[], None, false).unwrap(),
        ];
        let text = render(&papers);
        assert_eq!(text, "1. First\n\n2. Second\n   Session: Poster\n\n");
        assert!(!text.contains("URL"));
        assert!(!text.contains("Authors"));
    }
}
