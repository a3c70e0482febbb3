//! Document loading and orchestration
//!
//! This module turns a .docx package into the [`Document`] model: body blocks
//! in order via docx-rs, and the relationship store straight from the ZIP.

use std::io::Cursor;
use std::path::Path;

use zip::ZipArchive;

use super::io::{read_relationships, validate_docx_path, validate_package};
use super::models::*;
use super::parsing::formatting::extract_paragraph_text;
use super::parsing::heading::{paragraph_style_id, style_names};
use super::parsing::table::extract_table;
use crate::error::{ParseError, Result};

/// Load a .docx file from disk
///
/// The file is read asynchronously; parsing itself is synchronous and
/// CPU-bound.
pub async fn load_document(file_path: &Path) -> Result<Document> {
    validate_docx_path(file_path)?;

    let file_data = tokio::fs::read(file_path).await.map_err(ParseError::Io)?;

    let title = file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled Document")
        .to_string();

    let document = parse_docx(&title, &file_data)?;
    tracing::info!(
        path = %file_path.display(),
        blocks = document.blocks.len(),
        relationships = document.relationships.len(),
        "loaded document"
    );
    Ok(document)
}

/// Parse an in-memory .docx package
pub fn parse_docx(title: &str, file_data: &[u8]) -> Result<Document> {
    let mut archive = ZipArchive::new(Cursor::new(file_data))?;
    let main_part = validate_package(&mut archive)?;
    let relationships = read_relationships(&mut archive, &main_part)?;

    let docx = docx_rs::read_docx(file_data)?;

    let style_names = style_names(&docx.styles);

    let mut blocks = Vec::new();
    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                let style = paragraph_style_id(para);
                let style_name = style
                    .as_ref()
                    .and_then(|id| style_names.get(id))
                    .cloned();
                blocks.push(Block::Paragraph(Paragraph {
                    style,
                    style_name,
                    text: extract_paragraph_text(para),
                }));
            }
            docx_rs::DocumentChild::Table(table) => {
                blocks.push(Block::Table(extract_table(table)));
            }
            _ => {
                // Bookmarks, section properties and content controls carry
                // no section content
            }
        }
    }

    Ok(Document {
        title: title.to_string(),
        blocks,
        relationships,
    })
}
