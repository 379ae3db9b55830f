// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::Stage;

// Errors raised while retrieving the accepted-papers page
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 403 Forbidden, 500 Internal Server Error

    #[error("Accepted papers page not found: {0}")]
    PageNotFound(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Terminal failures of a pipeline run. Each one knows the stage it aborted in.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to fetch accepted papers: {0}")]
    Fetch(#[from] FetchError),

    #[error("No papers were parsed from the page for {year}")]
    NoRecords { year: u32 },
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Fetch(_) => Stage::Fetching,
            PipelineError::NoRecords { .. } => Stage::Parsing,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Pipeline failed while {}: {source}", .source.stage())]
    Pipeline {
        #[from]
        source: PipelineError,
    },

    #[error("Storage error at {path}: {source}")]
    Storage { path: PathBuf, source: StorageError },
}
