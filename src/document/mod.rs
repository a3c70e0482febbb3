//! Document parsing and data structures module
//!
//! This module reads Microsoft Word (.docx) packages into an ordered list of
//! body blocks plus the package's relationship store.

pub(crate) mod io;
pub(crate) mod loader;
pub mod models;
pub mod parsing;

pub use loader::{load_document, parse_docx};
pub use models::*;
