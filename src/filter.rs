// src/filter.rs
use crate::extractors::PaperEntry;

/// Keeps the papers whose title, joined authors or session contains
/// `keyword`, ignoring case. A missing or empty keyword keeps everything.
/// Surviving papers stay in their original order.
pub fn filter_by_keyword(papers: Vec<PaperEntry>, keyword: Option<&str>) -> Vec<PaperEntry> {
    let needle = match keyword {
        Some(k) if !k.is_empty() => k.to_lowercase(),
        _ => return papers,
    };

    papers
        .into_iter()
        .filter(|paper| matches_keyword(paper, &needle))
        .collect()
}

/// `needle` must already be lower-cased.
fn matches_keyword(paper: &PaperEntry, needle: &str) -> bool {
    let haystacks = [
        paper.title().to_lowercase(),
        paper.authors().join(" ").to_lowercase(),
        paper.session().unwrap_or_default().to_lowercase(),
    ];
    haystacks.iter().any(|hay| hay.contains(needle))
}

/// Truncates to the first `n` papers. `None` keeps all of them, and a limit
/// beyond the length is not an error.
pub fn limit(mut papers: Vec<PaperEntry>, n: Option<usize>) -> Vec<PaperEntry> {
    if let Some(n) = n {
        papers.truncate(n);
    }
    papers
}
