//! Package I/O: validation and the relationship store
//!
//! The body text goes through docx-rs, but the relationship store is read
//! straight from the ZIP container so every typed blob (not only the ones
//! docx-rs chooses to keep) is available to the extractor.

use std::io::{Read, Seek};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use super::models::Relationship;
use crate::error::ParseError;

const PACKAGE_RELS: &str = "_rels/.rels";
const DEFAULT_MAIN_PART: &str = "word/document.xml";
const OFFICE_DOCUMENT_TYPE_SUFFIX: &str = "/officeDocument";

/// Validates that the path names a .docx file
pub(crate) fn validate_docx_path(file_path: &Path) -> Result<(), ParseError> {
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if !extension.eq_ignore_ascii_case("docx") {
        return Err(ParseError::InvalidFormat(format!(
            "Invalid file format. Expected .docx file, got .{extension}\n\
            Note: sidedoc only supports Word .docx files (not .doc, .xlsx, .zip, etc.)"
        )));
    }

    Ok(())
}

/// Checks the container is a Word package and returns its main document part
pub(crate) fn validate_package<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<String, ParseError> {
    let main_part = find_main_part(archive)?;

    if archive.by_name(&main_part).is_err() {
        if archive.by_name("xl/workbook.xml").is_ok() {
            return Err(ParseError::InvalidFormat(
                "This appears to be an Excel file (.xlsx).\n\
                sidedoc only supports Word documents (.docx)."
                    .to_string(),
            ));
        }

        return Err(ParseError::InvalidFormat(format!(
            "Invalid .docx file: missing {main_part}\n\
            This file may be corrupted or is not a valid Word document."
        )));
    }

    Ok(main_part)
}

/// Resolve the main document part from the package-level relationships
fn find_main_part<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String, ParseError> {
    let Some(xml) = read_part_to_string(archive, PACKAGE_RELS)? else {
        return Ok(DEFAULT_MAIN_PART.to_string());
    };

    let rels = parse_relationships_xml(&xml)?;
    let main = rels
        .into_iter()
        .find(|rel| rel.rel_type.ends_with(OFFICE_DOCUMENT_TYPE_SUFFIX))
        .map(|rel| resolve_target("", &rel.target))
        .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string());

    Ok(main)
}

/// Read every relationship of the main document part, loading internal blobs
pub(crate) fn read_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    main_part: &str,
) -> Result<Vec<Relationship>, ParseError> {
    let (base_dir, file_name) = match main_part.rsplit_once('/') {
        Some((dir, name)) => (dir, name),
        None => ("", main_part),
    };
    let rels_part = if base_dir.is_empty() {
        format!("_rels/{file_name}.rels")
    } else {
        format!("{base_dir}/_rels/{file_name}.rels")
    };

    let Some(xml) = read_part_to_string(archive, &rels_part)? else {
        tracing::debug!(part = %rels_part, "no relationship part");
        return Ok(Vec::new());
    };

    let mut relationships = Vec::new();
    for entry in parse_relationships_xml(&xml)? {
        if entry.external {
            relationships.push(Relationship {
                id: entry.id,
                rel_type: entry.rel_type,
                target: entry.target,
                external: true,
                blob: Vec::new(),
            });
            continue;
        }

        let part_name = resolve_target(base_dir, &entry.target);
        match read_part(archive, &part_name)? {
            Some(blob) => relationships.push(Relationship::internal(
                entry.id,
                entry.rel_type,
                part_name,
                blob,
            )),
            None if entry.rel_type.contains("image") => {
                return Err(ParseError::MissingPart {
                    id: entry.id,
                    target: part_name,
                });
            }
            None => {
                tracing::debug!(id = %entry.id, part = %part_name, "relationship target missing, ignored");
            }
        }
    }

    Ok(relationships)
}

/// One `<Relationship>` element, before its target is loaded
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RelationshipEntry {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    pub external: bool,
}

pub(crate) fn parse_relationships_xml(xml: &str) -> Result<Vec<RelationshipEntry>, ParseError> {
    let doc = roxmltree::Document::parse(xml.trim_start_matches('\u{feff}'))?;

    let entries = doc
        .root_element()
        .children()
        .filter(|node| node.has_tag_name("Relationship"))
        .filter_map(|node| {
            let id = node.attribute("Id")?;
            let target = node.attribute("Target")?;
            Some(RelationshipEntry {
                id: id.to_string(),
                rel_type: node.attribute("Type").unwrap_or("").to_string(),
                target: target.to_string(),
                external: node
                    .attribute("TargetMode")
                    .is_some_and(|mode| mode.eq_ignore_ascii_case("External")),
            })
        })
        .collect();

    Ok(entries)
}

/// Resolve a relationship target against the directory of its source part
pub(crate) fn resolve_target(base_dir: &str, target: &str) -> String {
    let (base, path) = match target.strip_prefix('/') {
        Some(absolute) => ("", absolute),
        None => (base_dir, target),
    };

    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Largest buffer reserved up front from a part's declared size
const MAX_PART_PREALLOC: usize = 1 << 20;

/// Initial buffer size for a part; the header size is not trusted beyond the cap
fn part_capacity(declared_size: u64) -> usize {
    usize::try_from(declared_size)
        .unwrap_or(MAX_PART_PREALLOC)
        .min(MAX_PART_PREALLOC)
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>, ParseError> {
    match archive.by_name(name) {
        Ok(mut file) => {
            let mut buf = Vec::with_capacity(part_capacity(file.size()));
            file.read_to_end(&mut buf)?;
            Ok(Some(buf))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn read_part_to_string<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, ParseError> {
    match read_part(archive, name)? {
        Some(bytes) => String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| ParseError::InvalidFormat(format!("{name} is not valid UTF-8"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn package(parts: &[(&str, &str)]) -> ZipArchive<Cursor<Vec<u8>>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in parts {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data.as_bytes()).unwrap();
        }
        let cursor = writer.finish().unwrap();
        ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap()
    }

    const DOC_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="https://example.com/a.png" TargetMode="External"/>
</Relationships>"#;

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("word", "media/image1.png"), "word/media/image1.png");
        assert_eq!(resolve_target("word", "../customXml/item1.xml"), "customXml/item1.xml");
        assert_eq!(resolve_target("word", "/word/media/a.png"), "word/media/a.png");
        assert_eq!(resolve_target("", "word/document.xml"), "word/document.xml");
    }

    #[test]
    fn test_parse_relationships_xml() {
        let entries = parse_relationships_xml(DOC_RELS).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].id, "rId2");
        assert!(entries[1].rel_type.ends_with("/image"));
        assert!(!entries[1].external);
        assert!(entries[2].external);
    }

    #[test]
    fn test_read_relationships_loads_blobs() {
        let mut archive = package(&[
            ("word/document.xml", "<w:document/>"),
            ("word/styles.xml", "<w:styles/>"),
            ("word/_rels/document.xml.rels", DOC_RELS),
            ("word/media/image1.png", "not really a png"),
        ]);

        let main = validate_package(&mut archive).unwrap();
        assert_eq!(main, "word/document.xml");

        let rels = read_relationships(&mut archive, &main).unwrap();
        assert_eq!(rels.len(), 3);
        assert_eq!(rels[1].target, "word/media/image1.png");
        assert_eq!(rels[1].blob, b"not really a png");
        assert!(rels[2].external);
        assert!(rels[2].blob.is_empty());
    }

    #[test]
    fn test_missing_image_part_is_parse_error() {
        let mut archive = package(&[
            ("word/document.xml", "<w:document/>"),
            ("word/styles.xml", "<w:styles/>"),
            ("word/_rels/document.xml.rels", DOC_RELS),
        ]);

        let err = read_relationships(&mut archive, "word/document.xml").unwrap_err();
        assert!(matches!(err, ParseError::MissingPart { ref id, .. } if id == "rId2"));
    }

    #[test]
    fn test_excel_package_rejected() {
        let mut archive = package(&[("xl/workbook.xml", "<workbook/>")]);
        let err = validate_package(&mut archive).unwrap_err();
        assert!(err.to_string().contains("Excel"));
    }

    #[test]
    fn test_extension_check() {
        assert!(validate_docx_path(Path::new("report.docx")).is_ok());
        assert!(validate_docx_path(Path::new("REPORT.DOCX")).is_ok());
        assert!(validate_docx_path(Path::new("report.doc")).is_err());
    }

    #[test]
    fn test_declared_part_size_is_capped() {
        assert_eq!(part_capacity(512), 512);
        assert_eq!(part_capacity(u64::MAX), MAX_PART_PREALLOC);
        assert_eq!(part_capacity(MAX_PART_PREALLOC as u64 + 1), MAX_PART_PREALLOC);
    }

    #[test]
    fn test_read_part_returns_contents() {
        let mut archive = package(&[("word/document.xml", "<w:document/>")]);
        assert_eq!(
            read_part(&mut archive, "word/document.xml").unwrap(),
            Some(b"<w:document/>".to_vec())
        );
        assert_eq!(read_part(&mut archive, "word/missing.xml").unwrap(), None);
    }
}
