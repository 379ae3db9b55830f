// src/utils/html_debug.rs
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::pipeline::PageSource;
use crate::utils::error::{AppError, FetchError};

/// Structural markers the row extractor relies on. Highlighting them makes
/// an upstream layout change easy to spot in a browser.
pub const LAYOUT_PATTERNS: [(&str, &str); 5] = [
    (r"(?i)<tr\b[^>]*>", "row"),
    (r"(?i)<div[^>]*class=['\x22]?[^'\x22>]*\bindented\b[^>]*>", "authors"),
    (r"(?i)<br\s*/?>", "break"),
    (r"(?i)<img[^>]*(?:title|alt)=['\x22][^'\x22]*(?:highlight|award)[^'\x22]*['\x22][^>]*>", "badge"),
    (r"(?i)<(?:a\s[^>]*href|strong|b)\b[^>]*>", "title"),
];

/// Saves a HTML document to a file with debug highlights
pub fn save_debug_html(html: &str, filename: &Path, header: &str, highlights: &[(usize, usize, &str)]) -> Result<(), AppError> {
    // Add debug styling in head
    let mut debug_html = format!("<!DOCTYPE html>\n<!-- {} -->\n<html>\n<head>\n<style>\n", header);

    // CSS for highlight colors
    debug_html.push_str(".highlight-row { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-authors { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-break { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-badge { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n");

    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| h.0); // Sort by position

    for (start, end, highlight_type) in sorted_highlights {
        // Overlapping matches would split the document out of order
        if start < last_pos {
            continue;
        }
        debug_html.push_str(&html[last_pos..start]);

        let css_class = match highlight_type {
            "row" => "highlight-row",
            "authors" => "highlight-authors",
            "break" => "highlight-break",
            "badge" => "highlight-badge",
            _ => "highlight-custom",
        };

        debug_html.push_str(&format!("<span class=\"{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type));
        debug_html.push_str(&html[start..end]);
        debug_html.push_str("</span>");

        last_pos = end;
    }

    // Add any remaining content
    if last_pos < html.len() {
        debug_html.push_str(&html[last_pos..]);
    }

    debug_html.push_str("\n</body>\n</html>");

    fs::write(filename, debug_html)?;

    tracing::info!("Saved debug HTML to {}", filename.display());
    Ok(())
}

/// Creates a debug version of an HTML document with locations of specified regex patterns highlighted
pub fn create_debug_html(html: &str, filename: &Path, header: &str, patterns: &[(&str, &str)]) -> Result<(), AppError> {
    let mut highlights = Vec::new();

    // Find all matches for each pattern and add them to highlights
    for (pattern, highlight_type) in patterns {
        let re = Regex::new(pattern).map_err(|e| {
            AppError::Config(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(html) {
            highlights.push((mat.start(), mat.end(), *highlight_type));
        }
    }

    save_debug_html(html, filename, header, &highlights)
}

/// Page source wrapper that keeps an annotated copy of every fetched page.
/// Snapshot failures are logged and never affect the fetch result.
pub struct SnapshotSource<S> {
    inner: S,
    dir: PathBuf,
}

impl<S> SnapshotSource<S> {
    pub fn new<P: Into<PathBuf>>(inner: S, dir: P) -> Self {
        Self { inner, dir: dir.into() }
    }

    pub fn snapshot_path(&self, year: u32) -> PathBuf {
        self.dir.join(format!("cvpr_{}_raw.html", year))
    }
}

impl<S: PageSource> SnapshotSource<S> {
    fn save_snapshot(&self, year: u32, html: &str) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.snapshot_path(year);
        let header = format!(
            "captured {} from {}",
            chrono::Utc::now().to_rfc3339(),
            self.inner.describe(year).replace("--", "- -")
        );
        create_debug_html(html, &path, &header, &LAYOUT_PATTERNS)?;
        Ok(path)
    }
}

impl<S: PageSource> PageSource for SnapshotSource<S> {
    async fn fetch_page(&self, year: u32) -> Result<String, FetchError> {
        let html = self.inner.fetch_page(year).await?;
        if let Err(e) = self.save_snapshot(year, &html) {
            tracing::warn!("Failed to create debug HTML: {}", e);
        }
        Ok(html)
    }

    fn describe(&self, year: u32) -> String {
        self.inner.describe(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio_test::block_on;

    struct FixedPage;

    impl PageSource for FixedPage {
        async fn fetch_page(&self, _year: u32) -> Result<String, FetchError> {
            Ok(r#"<table><tr><td><a href="/p/1">T</a><img title="Award"><br>Oral<div class="indented">A</div></td></tr></table>"#.to_string())
        }
    }

    #[test]
    fn layout_patterns_compile() {
        for (pattern, _) in LAYOUT_PATTERNS {
            assert!(Regex::new(pattern).is_ok(), "bad pattern {}", pattern);
        }
    }

    #[test]
    fn snapshot_marks_layout_and_passes_page_through() {
        let dir = tempdir().unwrap();
        let source = SnapshotSource::new(FixedPage, dir.path().join("debug"));

        let html = block_on(source.fetch_page(2024)).unwrap();
        assert!(html.starts_with("<table>"));

        let saved = fs::read_to_string(source.snapshot_path(2024)).unwrap();
        assert!(saved.contains("<!-- captured "));
        assert!(saved.contains("class=\"highlight-row\""));
        assert!(saved.contains("class=\"highlight-authors\""));
        assert!(saved.contains("class=\"highlight-badge\""));
        assert!(saved.contains("class=\"highlight-break\""));
    }

    #[test]
    fn unwritable_snapshot_dir_does_not_fail_fetch() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let source = SnapshotSource::new(FixedPage, &blocker);
        assert!(block_on(source.fetch_page(2024)).is_ok());
    }
}
