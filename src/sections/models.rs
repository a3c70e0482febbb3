//! Section data structures
//!
//! A [`ContentTree`] maps each heading's text to the content it owns. An
//! [`AggregatedView`] lines several trees up by heading for side-by-side
//! comparison.

use std::collections::BTreeMap;

use image::DynamicImage;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

pub use crate::document::parsing::table::TableGrid;

/// A decoded image attributed to a section
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub relationship_id: String,
    /// Package part the image was read from, e.g. `word/media/image1.png`
    pub target: String,
    pub format: Option<image::ImageFormat>,
    pub image: DynamicImage,
}

impl Figure {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

// Pixel data stays out of serialized output; only describe the figure
impl Serialize for Figure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Figure", 5)?;
        state.serialize_field("relationship_id", &self.relationship_id)?;
        state.serialize_field("target", &self.target)?;
        state.serialize_field(
            "format",
            &self.format.map(|f| f.extensions_str().first().copied().unwrap_or("unknown")),
        )?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.end()
    }
}

/// Content owned by one section key
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentRecord {
    pub paragraphs: Vec<String>,
    pub tables: Vec<TableGrid>,
    pub figures: Vec<Figure>,
}

impl ContentRecord {
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.tables.is_empty() && self.figures.is_empty()
    }
}

/// One document's section key → content mapping
///
/// Immutable once returned by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContentTree {
    sections: BTreeMap<String, ContentRecord>,
}

impl ContentTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record for `key`, created empty on first sight
    pub(crate) fn section_mut(&mut self, key: &str) -> &mut ContentRecord {
        self.sections.entry(key.to_string()).or_default()
    }

    pub fn get(&self, key: &str) -> Option<&ContentRecord> {
        self.sections.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.sections.contains_key(key)
    }

    /// Section keys in lexicographic order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentRecord)> {
        self.sections.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Section key → one record per input document, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedView {
    document_count: usize,
    sections: BTreeMap<String, Vec<ContentRecord>>,
}

impl AggregatedView {
    pub(crate) fn new(
        document_count: usize,
        sections: BTreeMap<String, Vec<ContentRecord>>,
    ) -> Self {
        Self {
            document_count,
            sections,
        }
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn get(&self, key: &str) -> Option<&[ContentRecord]> {
        self.sections.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Sections in lexicographic key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ContentRecord])> {
        self.sections
            .iter()
            .map(|(key, records)| (key.as_str(), records.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
