//! Section extraction
//!
//! Walks a document's paragraphs in order, grouping each one under the most
//! recent heading. Images and tables are collected in separate passes after
//! the paragraph walk, so they are attributed to the last heading of the
//! whole document rather than the heading they visually follow.

use crate::config::{ExtractOptions, FigureOrder};
use crate::document::parsing::heading::is_heading_style;
use crate::document::parsing::table::{TableGrid, normalize_grid};
use crate::document::{Document, Relationship};
use crate::error::{DecodeError, Result};

use super::models::{ContentTree, Figure};

/// Build the section tree of a document with default options
pub fn extract(document: &Document) -> Result<ContentTree> {
    extract_with_options(document, &ExtractOptions::default())
}

pub fn extract_with_options(document: &Document, options: &ExtractOptions) -> Result<ContentTree> {
    let mut tree = ContentTree::new();
    let mut current_key: Option<&str> = None;

    for para in document.paragraphs() {
        if is_heading_style(para.style_label(), &options.heading_style_prefix) {
            // Re-encountering a heading extends its existing record
            tree.section_mut(&para.text);
            current_key = Some(para.text.as_str());
            tracing::debug!(title = %document.title, section = %para.text, "section heading");
        } else if let Some(key) = current_key {
            if !options.keep_empty_paragraphs && para.text.trim().is_empty() {
                continue;
            }
            tree.section_mut(key).paragraphs.push(para.text.clone());
        }
    }

    // Every image is decoded even when no heading exists to own it, so a
    // corrupt image always fails the document
    let figures = decode_figures(document, options.figure_order)?;
    let tables: Vec<TableGrid> = document.tables().map(normalize_grid).collect();

    match current_key {
        Some(key) => {
            tracing::debug!(
                title = %document.title,
                section = %key,
                figures = figures.len(),
                tables = tables.len(),
                "attributing figures and tables to last section"
            );
            let record = tree.section_mut(key);
            record.figures.extend(figures);
            record.tables.extend(tables);
        }
        None if !figures.is_empty() || !tables.is_empty() => {
            tracing::debug!(
                title = %document.title,
                figures = figures.len(),
                tables = tables.len(),
                "document has no headings, figures and tables discarded"
            );
        }
        None => {}
    }

    Ok(tree)
}

/// Decode every image relationship, in the requested order
fn decode_figures(document: &Document, order: FigureOrder) -> Result<Vec<Figure>> {
    let mut relationships: Vec<&Relationship> = document.image_relationships().collect();
    if order == FigureOrder::Id {
        relationships.sort_by(|a, b| natural_id_key(&a.id).cmp(&natural_id_key(&b.id)));
    }

    let mut figures = Vec::with_capacity(relationships.len());
    for rel in relationships {
        if rel.external {
            tracing::warn!(
                title = %document.title,
                id = %rel.id,
                target = %rel.target,
                "skipping externally linked image"
            );
            continue;
        }
        figures.push(decode_figure(rel)?);
    }

    Ok(figures)
}

fn decode_figure(rel: &Relationship) -> Result<Figure> {
    let image = image::load_from_memory(&rel.blob).map_err(|source| DecodeError {
        relationship_id: rel.id.clone(),
        target: rel.target.clone(),
        source,
    })?;

    Ok(Figure {
        relationship_id: rel.id.clone(),
        target: rel.target.clone(),
        format: image::guess_format(&rel.blob).ok(),
        image,
    })
}

/// Sort key splitting a trailing number off an ID, so `rId2` sorts before `rId10`
fn natural_id_key(id: &str) -> (&str, Option<u64>, &str) {
    let digits_start = id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(index, _)| index)
        .unwrap_or(id.len());

    let (prefix, digits) = id.split_at(digits_start);
    (prefix, digits.parse().ok(), id)
}
