// src/main.rs
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use cvpr_extractor::cvpr::{ClientConfig, CvprClient};
use cvpr_extractor::render::render_papers;
use cvpr_extractor::storage::default_json_path;
use cvpr_extractor::utils::{self, html_debug::SnapshotSource, AppError};
use cvpr_extractor::{pipeline, JsonExport, PageSource, RunOptions};

/// Extract accepted paper metadata from the CVPR website.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Conference year to fetch
    #[arg(short, long, default_value_t = 2024)]
    year: u32,

    /// Only keep papers whose title, authors or session contain this substring
    #[arg(short, long)]
    keyword: Option<String>,

    /// Return only the first N matches
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
    limit: Option<u64>,

    /// Custom JSON output path (default: cvpr_<year>_accepted.json)
    #[arg(long = "json", value_name = "PATH")]
    json_path: Option<PathBuf>,

    /// Disable automatic JSON export (prints only)
    #[arg(long, conflicts_with = "json_path")]
    no_json: bool,

    /// Page URL template, `{year}` is substituted (overrides CVPR_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Debug mode - save an annotated copy of the fetched page
    #[arg(short, long)]
    debug: bool,

    /// Directory for debug snapshots
    #[arg(long, default_value = "./debug")]
    debug_dir: PathBuf,
}

impl Args {
    fn run_options(&self) -> RunOptions {
        let json_path = if self.no_json {
            None
        } else {
            Some(self.json_path.clone().unwrap_or_else(|| default_json_path(self.year)))
        };
        RunOptions {
            keyword: self.keyword.clone(),
            limit: self.limit.map(|n| usize::try_from(n).unwrap_or(usize::MAX)),
            json_path,
        }
    }

    fn client_config(&self) -> Result<ClientConfig, AppError> {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.base_url {
            if !url.contains("{year}") {
                return Err(AppError::Config(format!(
                    "--base-url must contain a {{year}} placeholder: {}",
                    url
                )));
            }
            config.base_url = url.clone();
        }
        Ok(config)
    }
}

async fn execute<S: PageSource>(source: &S, args: &Args) -> Result<(), AppError> {
    let report = pipeline::run(source, args.year, &args.run_options()).await?;

    let mut export_failure = None;
    match report.export {
        JsonExport::Written(path) => {
            println!("Wrote {} records to {}", report.papers.len(), path.display());
        }
        JsonExport::Failed { path, error } => {
            tracing::error!("Failed to save JSON export: {}", error);
            export_failure = Some(AppError::Storage { path, source: error });
        }
        JsonExport::Disabled => tracing::debug!("JSON export disabled"),
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_papers(&report.papers, &mut out)?;
    writeln!(out, "Displayed {} records.", report.papers.len())?;
    out.flush()?;

    tracing::info!(
        "Processing finished. Parsed: {}, Displayed: {}",
        report.parsed_count,
        report.papers.len()
    );

    // Records were shown; still report the failed export to the shell
    match export_failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Build the page client
    let client = CvprClient::new(args.client_config()?)
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

    // 4. Run the pipeline, keeping an annotated page copy in debug mode
    let result = if args.debug {
        let source = SnapshotSource::new(client, &args.debug_dir);
        execute(&source, &args).await
    } else {
        execute(&client, &args).await
    };

    if let Err(e) = &result {
        tracing::error!("{}", e);
    }
    result
}
