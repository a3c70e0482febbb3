//! Core data structures for document representation
//!
//! A loaded document is kept deliberately close to the package: an ordered
//! list of body blocks plus the unordered relationship store. Nothing here
//! knows about sections; grouping happens in [`crate::sections`].

use serde::{Deserialize, Serialize};

/// Raw table rows as read from the package, before grid normalization
pub type TableRows = Vec<Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<Block>,
    pub relationships: Vec<Relationship>,
}

/// A top-level element of the document body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Style identifier from `w:pStyle`, e.g. `Heading1`
    pub style: Option<String>,
    /// Display name of that style from the styles part, e.g. `heading 1`
    #[serde(default)]
    pub style_name: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column count declared by the table grid (`w:tblGrid`), zero if absent
    pub column_count: usize,
    /// Cell text per row, with merged cells already repeated across their span
    pub rows: TableRows,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    /// `TargetMode="External"`: the target is a URI, not a package part
    pub external: bool,
    /// Part contents, empty for external targets
    pub blob: Vec<u8>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_paragraph(mut self, style: Option<&str>, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph(Paragraph {
            style: style.map(str::to_string),
            style_name: None,
            text: text.into(),
        }));
        self
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.blocks.push(Block::Table(table));
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(para) => Some(para),
            Block::Table(_) => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            Block::Paragraph(_) => None,
        })
    }

    /// Relationships whose type names an image, in store order
    pub fn image_relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(|rel| rel.is_image())
    }
}

impl Paragraph {
    /// Style name when the styles part defines one, else the identifier
    pub fn style_label(&self) -> Option<&str> {
        self.style_name.as_deref().or(self.style.as_deref())
    }
}

impl Table {
    pub fn new(rows: TableRows) -> Self {
        Self {
            column_count: 0,
            rows,
        }
    }

    pub fn with_column_count(mut self, column_count: usize) -> Self {
        self.column_count = column_count;
        self
    }
}

impl Relationship {
    pub fn is_image(&self) -> bool {
        self.rel_type.contains("image")
    }

    pub fn internal(
        id: impl Into<String>,
        rel_type: impl Into<String>,
        target: impl Into<String>,
        blob: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            rel_type: rel_type.into(),
            target: target.into(),
            external: false,
            blob,
        }
    }
}
