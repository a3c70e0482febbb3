//! Rendering an aggregated view for reading
//!
//! Each section is printed once, followed by every document's record for it
//! in input order. Figures are described inline and can be written to disk
//! with [`save_figures`].

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use unicode_segmentation::UnicodeSegmentation;

use crate::ExportFormat;
use crate::config::OutputOptions;
use crate::sections::{AggregatedView, ContentRecord, TableGrid};

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid regex"));

/// Render `view` in the configured format
pub fn export(
    view: &AggregatedView,
    titles: &[String],
    options: &OutputOptions,
) -> Result<String> {
    match options.format {
        ExportFormat::Text => export_to_text(view, titles, options),
        ExportFormat::Markdown => export_to_markdown(view, titles),
        ExportFormat::Json => export_to_json(view, titles),
    }
}

fn document_title(titles: &[String], index: usize) -> String {
    titles
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("Document {}", index + 1))
}

pub fn export_to_text(
    view: &AggregatedView,
    titles: &[String],
    options: &OutputOptions,
) -> Result<String> {
    let mut output = String::new();

    for (key, records) in view.iter() {
        writeln!(output, "== {key} ==")?;

        for (index, record) in records.iter().enumerate() {
            writeln!(output)?;
            writeln!(output, "[{}]", document_title(titles, index))?;

            if record.is_empty() {
                writeln!(output, "(no content)")?;
                continue;
            }
            write_text_record(&mut output, record, options)?;
        }
        writeln!(output)?;
    }

    Ok(output)
}

fn write_text_record(
    output: &mut String,
    record: &ContentRecord,
    options: &OutputOptions,
) -> Result<()> {
    for para in &record.paragraphs {
        writeln!(output, "{para}")?;
    }

    for table in &record.tables {
        write_text_table(output, table, options.table_cell_width)?;
    }

    for figure in &record.figures {
        writeln!(
            output,
            "[Figure {}: {}, {}x{}]",
            figure.relationship_id,
            figure.target,
            figure.width(),
            figure.height()
        )?;
    }

    Ok(())
}

fn write_text_table(output: &mut String, table: &TableGrid, max_width: usize) -> Result<()> {
    let Some(first_row) = table.first() else {
        return Ok(());
    };

    let cells: Vec<Vec<String>> = table
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| truncate_graphemes(&cell.replace('\n', " "), max_width))
                .collect()
        })
        .collect();

    let mut widths = vec![1; first_row.len()];
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.graphemes(true).count());
        }
    }

    let border: String = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    writeln!(output, "+{border}+")?;

    for row in &cells {
        output.push('|');
        for (cell, width) in row.iter().zip(&widths) {
            let padding = width - cell.graphemes(true).count();
            write!(output, " {cell}{} |", " ".repeat(padding))?;
        }
        output.push('\n');
    }
    writeln!(output, "+{border}+")?;

    Ok(())
}

fn truncate_graphemes(text: &str, max_width: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    if max_width == 0 || graphemes.len() <= max_width {
        return text.to_string();
    }

    let mut truncated: String = graphemes[..max_width.saturating_sub(1)].concat();
    truncated.push('…');
    truncated
}

pub fn export_to_markdown(view: &AggregatedView, titles: &[String]) -> Result<String> {
    let mut output = String::new();

    for (key, records) in view.iter() {
        writeln!(output, "## {key}")?;
        writeln!(output)?;

        for (index, record) in records.iter().enumerate() {
            writeln!(output, "### {}", document_title(titles, index))?;
            writeln!(output)?;

            if record.is_empty() {
                writeln!(output, "_No content._")?;
                writeln!(output)?;
                continue;
            }

            for para in record.paragraphs.iter().filter(|p| !p.trim().is_empty()) {
                writeln!(output, "{para}")?;
                writeln!(output)?;
            }

            for table in &record.tables {
                write_markdown_table(&mut output, table)?;
            }

            for figure in &record.figures {
                writeln!(output, "![{}]({})", figure.relationship_id, figure.target)?;
                writeln!(output)?;
            }
        }
    }

    Ok(output)
}

fn write_markdown_table(output: &mut String, table: &TableGrid) -> Result<()> {
    let Some((header, rows)) = table.split_first() else {
        return Ok(());
    };

    let escape = |cell: &String| cell.replace('|', "\\|").replace('\n', "<br>");

    let header_cells: Vec<String> = header.iter().map(escape).collect();
    writeln!(output, "| {} |", header_cells.join(" | "))?;
    writeln!(output, "|{}|", vec![" --- "; header.len()].join("|"))?;

    for row in rows {
        let cells: Vec<String> = row.iter().map(escape).collect();
        writeln!(output, "| {} |", cells.join(" | "))?;
    }
    writeln!(output)?;

    Ok(())
}

#[derive(Serialize)]
struct JsonExport<'a> {
    documents: Vec<String>,
    #[serde(flatten)]
    view: &'a AggregatedView,
}

pub fn export_to_json(view: &AggregatedView, titles: &[String]) -> Result<String> {
    let payload = JsonExport {
        documents: (0..view.document_count())
            .map(|index| document_title(titles, index))
            .collect(),
        view,
    };

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// File-system friendly form of a section key
pub fn section_slug(key: &str) -> String {
    let slug = NON_SLUG_CHARS
        .replace_all(key, "-")
        .trim_matches('-')
        .to_lowercase();

    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

/// Relationship ID reduced to letters, digits and dashes, case kept
fn figure_slug(relationship_id: &str) -> String {
    let slug = NON_SLUG_CHARS.replace_all(relationship_id, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        "figure".to_string()
    } else {
        slug.to_string()
    }
}

/// Write every figure as PNG under `dir/<section>/<document>-<relationship>.png`
pub fn save_figures(view: &AggregatedView, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (key, records) in view.iter() {
        let section_dir = dir.join(section_slug(key));

        for (index, record) in records.iter().enumerate() {
            for figure in &record.figures {
                fs::create_dir_all(&section_dir)
                    .with_context(|| format!("creating {}", section_dir.display()))?;

                let file_name =
                    format!("{}-{}.png", index + 1, figure_slug(&figure.relationship_id));
                let path = section_dir.join(file_name);
                figure
                    .image
                    .save_with_format(&path, image::ImageFormat::Png)
                    .with_context(|| format!("writing {}", path.display()))?;

                tracing::debug!(section = %key, path = %path.display(), "saved figure");
                written.push(path);
            }
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Relationship, Table};
    use crate::sections::{aggregate, extract};

    fn sample_view() -> AggregatedView {
        let a = Document::new("a")
            .with_paragraph(Some("Heading1"), "Intro")
            .with_paragraph(None, "Alpha text")
            .with_table(Table::new(vec![
                vec!["Name".to_string(), "Value".to_string()],
                vec!["x|y".to_string(), "1".to_string()],
            ]));
        let b = Document::new("b")
            .with_paragraph(Some("Heading1"), "Intro")
            .with_paragraph(None, "Beta text")
            .with_paragraph(Some("Heading1"), "Extra");

        aggregate(&[extract(&a).unwrap(), extract(&b).unwrap()])
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([0, 0, 0]));
        let mut buf = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn titles() -> Vec<String> {
        vec!["first.docx".to_string(), "second.docx".to_string()]
    }

    #[test]
    fn test_text_export() {
        let text = export_to_text(&sample_view(), &titles(), &OutputOptions::default()).unwrap();

        assert!(text.contains("== Extra =="));
        assert!(text.contains("== Intro =="));
        assert!(text.find("== Extra ==") < text.find("== Intro =="));
        assert!(text.contains("[first.docx]\nAlpha text"));
        assert!(text.contains("[second.docx]\nBeta text"));
        assert!(text.contains("| Name | Value |"));
        assert!(text.contains("(no content)"));
    }

    #[test]
    fn test_text_table_truncates_wide_cells() {
        let mut output = String::new();
        let table = vec![vec!["abcdefghij".to_string(), "z".to_string()]];
        write_text_table(&mut output, &table, 4).unwrap();

        assert!(output.contains("| abc… | z |"));
    }

    #[test]
    fn test_markdown_export() {
        let md = export_to_markdown(&sample_view(), &titles()).unwrap();

        assert!(md.contains("## Intro"));
        assert!(md.contains("### second.docx"));
        assert!(md.contains("| Name | Value |"));
        assert!(md.contains("| x\\|y | 1 |"));
        assert!(md.contains("_No content._"));
    }

    #[test]
    fn test_json_export() {
        let json = export_to_json(&sample_view(), &titles()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["documents"][1], "second.docx");
        assert_eq!(value["document_count"], 2);
        assert_eq!(value["sections"]["Intro"][0]["paragraphs"][0], "Alpha text");
        assert_eq!(value["sections"]["Intro"][0]["tables"][0][1][0], "x|y");
        assert_eq!(
            value["sections"]["Extra"][0]["paragraphs"]
                .as_array()
                .unwrap()
                .len(),
            0
        );
    }

    #[test]
    fn test_missing_titles_fall_back() {
        let text = export_to_text(&sample_view(), &[], &OutputOptions::default()).unwrap();
        assert!(text.contains("[Document 2]"));
    }

    #[test]
    fn test_section_slug() {
        assert_eq!(section_slug("1.2 Results & Discussion"), "1-2-results-discussion");
        assert_eq!(section_slug("Résumé"), "résumé");
        assert_eq!(section_slug("***"), "section");
    }

    #[test]
    fn test_figure_slug() {
        assert_eq!(figure_slug("rId7"), "rId7");
        assert_eq!(figure_slug("x/../../../escaped"), "x-escaped");
        assert_eq!(figure_slug("../"), "figure");
    }

    #[test]
    fn test_saved_figures_stay_in_section_dir() {
        let doc = Document::new("a")
            .with_paragraph(Some("Heading1"), "Intro")
            .with_relationship(Relationship::internal(
                "x/../../../escaped",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image",
                "word/media/image1.png",
                png(2, 2),
            ));
        let view = aggregate(&[extract(&doc).unwrap()]);

        let dir = std::env::temp_dir().join(format!("sidedoc-figures-{}", std::process::id()));
        let written = save_figures(&view, &dir).unwrap();
        let exists = written.iter().map(|path| path.exists()).collect::<Vec<_>>();
        fs::remove_dir_all(&dir).ok();

        assert_eq!(written, vec![dir.join("intro").join("1-x-escaped.png")]);
        assert_eq!(exists, vec![true]);
    }
}
