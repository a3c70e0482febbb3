//! sidedoc: section-by-section comparison of .docx files
//!
//! This library reads Microsoft Word documents, groups their paragraphs,
//! tables and images under the heading that owns them, and lines several
//! documents up by heading for side-by-side reading.

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod logging;
pub mod sections;

use serde::{Deserialize, Serialize};

/// Export format options
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

// Re-export commonly used types
pub use config::{Config, ExtractOptions, FigureOrder};
pub use document::{Document, load_document, parse_docx};
pub use error::{DecodeError, Error, ParseError, Result};
pub use sections::{
    AggregatedView, ContentRecord, ContentTree, Figure, TableGrid, aggregate, extract,
    extract_with_options,
};
