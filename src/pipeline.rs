// src/pipeline.rs
//
// One extraction run: fetch -> parse -> filter -> limit -> serialize.
// The run is sequential; the page fetch is its only await point.

use std::fmt;
use std::path::PathBuf;

use crate::extractors::{PaperEntry, PaperExtractor};
use crate::filter;
use crate::storage;
use crate::utils::error::{FetchError, PipelineError, StorageError};

/// Provider of the raw listing markup for a conference year.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&self, year: u32) -> Result<String, FetchError>;

    /// Where the page comes from, for log lines.
    fn describe(&self, year: u32) -> String {
        format!("accepted papers {}", year)
    }
}

/// Pipeline states, in the only order they are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Parsing,
    Filtering,
    Limiting,
    Serializing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Parsing => "parsing",
            Stage::Filtering => "filtering",
            Stage::Limiting => "limiting",
            Stage::Serializing => "serializing",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub keyword: Option<String>,
    pub limit: Option<usize>,
    /// Export target; `None` skips the JSON export.
    pub json_path: Option<PathBuf>,
}

/// Outcome of the JSON export step. A failed export does not fail the run.
#[derive(Debug)]
pub enum JsonExport {
    Disabled,
    Written(PathBuf),
    Failed { path: PathBuf, error: StorageError },
}

#[derive(Debug)]
pub struct RunReport {
    /// Filtered and limited papers, in page order.
    pub papers: Vec<PaperEntry>,
    /// Papers extracted before filtering.
    pub parsed_count: usize,
    pub export: JsonExport,
}

impl RunReport {
    pub fn count(&self) -> usize {
        self.papers.len()
    }
}

fn enter(stage: Stage) {
    tracing::debug!(%stage, "Pipeline stage");
}

/// Runs the pipeline once for `year`.
///
/// Fails only while fetching (transport/HTTP) or parsing (no row produced a
/// paper). Everything after parsing is in-memory, and an export failure is
/// reported through `RunReport::export`.
pub async fn run<S: PageSource>(
    source: &S,
    year: u32,
    options: &RunOptions,
) -> Result<RunReport, PipelineError> {
    enter(Stage::Fetching);
    tracing::info!("Fetching {}", source.describe(year));
    let html = source.fetch_page(year).await?;

    enter(Stage::Parsing);
    let papers = PaperExtractor::new().parse_papers(&html);
    let parsed_count = papers.len();
    if papers.is_empty() {
        tracing::error!("No papers were parsed from the page ({} bytes)", html.len());
        return Err(PipelineError::NoRecords { year });
    }
    tracing::info!("Parsed {} papers", parsed_count);

    enter(Stage::Filtering);
    let papers = filter::filter_by_keyword(papers, options.keyword.as_deref());
    if let Some(keyword) = options.keyword.as_deref().filter(|k| !k.is_empty()) {
        tracing::info!("{} papers match keyword '{}'", papers.len(), keyword);
    }

    enter(Stage::Limiting);
    let papers = filter::limit(papers, options.limit);

    enter(Stage::Serializing);
    let export = match &options.json_path {
        None => JsonExport::Disabled,
        Some(path) => match storage::write_json(&papers, path) {
            Ok(written) => JsonExport::Written(written),
            Err(error) => {
                tracing::error!("Failed to write {}: {}", path.display(), error);
                JsonExport::Failed { path: path.clone(), error }
            }
        },
    };

    enter(Stage::Done);
    Ok(RunReport {
        papers,
        parsed_count,
        export,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio_test::block_on;

    struct CannedPage(&'static str);

    impl PageSource for CannedPage {
        async fn fetch_page(&self, _year: u32) -> Result<String, FetchError> {
            Ok(self.0.to_string())
        }
    }

    struct MissingPage;

    impl PageSource for MissingPage {
        async fn fetch_page(&self, year: u32) -> Result<String, FetchError> {
            Err(FetchError::PageNotFound(format!("https://example.test/{}", year)))
        }
    }

    const PAGE: &str = r#"<html><body><table>
        <tr><th>Paper</th><th>Type</th><th>Location</th></tr>
        <tr><td><a href="/p/1">Fast Nets</a><br>Oral<div class="indented">A. One · B. Two</div></td><td>Oral</td><td>Hall B</td></tr>
        <tr><td><a href="/p/2">Slow Nets</a> Poster <br><div class="indented">C. Three</div></td><td>Poster</td><td>Hall C</td></tr>
        <tr><td>Lunch</td></tr>
        <tr><td><strong>Depth Things</strong><img title="Highlight"><br>Poster</td><td>Poster</td><td>Hall D</td></tr>
    </table></body></html>"#;

    #[test]
    fn full_run_filters_limits_and_exports() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("cvpr_2024_accepted.json");
        let options = RunOptions {
            keyword: Some("poster".to_string()),
            limit: Some(1),
            json_path: Some(path.clone()),
        };

        let report = block_on(run(&CannedPage(PAGE), 2024, &options)).unwrap();
        assert_eq!(report.parsed_count, 3);
        assert_eq!(report.count(), 1);
        assert_eq!(report.papers[0].title(), "Slow Nets");
        match report.export {
            JsonExport::Written(written) => assert_eq!(written, path),
            other => panic!("unexpected export outcome: {:?}", other),
        }
    }

    #[test]
    fn export_can_be_disabled() {
        let report = block_on(run(&CannedPage(PAGE), 2024, &RunOptions::default())).unwrap();
        assert_eq!(report.count(), 3);
        assert!(matches!(report.export, JsonExport::Disabled));
    }

    #[test]
    fn fetch_failure_aborts_in_fetching_stage() {
        let err = block_on(run(&MissingPage, 2019, &RunOptions::default())).unwrap_err();
        assert_eq!(err.stage(), Stage::Fetching);
        assert!(matches!(err, PipelineError::Fetch(FetchError::PageNotFound(_))));
    }

    #[test]
    fn scenario_e_no_rows_is_distinct_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("never.json");
        let options = RunOptions {
            json_path: Some(path.clone()),
            ..RunOptions::default()
        };
        let page = CannedPage("<html><body><table><tr><td>Schedule TBA</td></tr></table></body></html>");

        let err = block_on(run(&page, 2030, &options)).unwrap_err();
        assert!(matches!(err, PipelineError::NoRecords { year: 2030 }));
        assert_eq!(err.stage(), Stage::Parsing);
        assert!(!path.exists(), "no JSON should be written when nothing parsed");
    }

    #[test]
    fn keyword_matching_nothing_still_succeeds() {
        let options = RunOptions {
            keyword: Some("transformers".to_string()),
            ..RunOptions::default()
        };
        let report = block_on(run(&CannedPage(PAGE), 2024, &options)).unwrap();
        assert_eq!(report.parsed_count, 3);
        assert!(report.papers.is_empty());
    }

    #[test]
    fn export_failure_keeps_papers() {
        let dir = tempdir().unwrap();
        let options = RunOptions {
            // Target is an existing directory
            json_path: Some(dir.path().to_path_buf()),
            ..RunOptions::default()
        };
        let report = block_on(run(&CannedPage(PAGE), 2024, &options)).unwrap();
        assert_eq!(report.count(), 3);
        assert!(matches!(report.export, JsonExport::Failed { .. }));
    }
}
