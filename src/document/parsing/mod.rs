//! Document parsing utilities
//!
//! This module contains the docx-rs walkers for paragraphs, headings and
//! tables.

pub(crate) mod formatting;
pub mod heading;
pub mod table;
