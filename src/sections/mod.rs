//! Section extraction and cross-document aggregation
//!
//! [`extract`] turns one [`Document`](crate::document::Document) into a
//! heading-indexed [`ContentTree`]; [`aggregate`] aligns many trees for
//! side-by-side comparison.

pub mod aggregator;
pub mod extractor;
pub mod models;

pub use aggregator::aggregate;
pub use extractor::{extract, extract_with_options};
pub use models::*;
