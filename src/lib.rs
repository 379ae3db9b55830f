// src/lib.rs
//! Extracts accepted-paper records from the CVPR accepted-papers listing.
//!
//! The flow is fetch -> parse -> filter -> limit -> serialize; see
//! [`pipeline::run`]. Front-ends supply a [`pipeline::PageSource`] and render
//! the returned [`extractors::PaperEntry`] records however they like.

pub mod cvpr;
pub mod extractors;
pub mod filter;
pub mod pipeline;
pub mod render;
pub mod storage;
pub mod utils;

pub use extractors::{PaperEntry, PaperExtractor};
pub use pipeline::{run, JsonExport, PageSource, RunOptions, RunReport, Stage};
pub use utils::error::{AppError, FetchError, PipelineError, StorageError};
