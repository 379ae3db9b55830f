// src/extractors/mod.rs
pub mod paper;
pub mod rules;
pub mod text;

// Re-export key extraction types for convenience
pub use paper::{PaperEntry, PaperExtractor};
pub use rules::{
    AuthorsRule,
    FieldRule,
    HighlightRule,
    LocationRule,
    RowCells,
    SessionRule,
    TitleField,
    TitleRule,
};
