//! Text extraction utilities
//!
//! This module flattens docx-rs paragraph and run elements into plain text.
//! Paragraph text is kept exactly as written, surrounding whitespace included,
//! and reads only direct runs and hyperlink runs.

/// Extract plain text from a paragraph, handling various child elements
pub(crate) fn extract_paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&mut text, &para.children);
    text
}

fn push_children_text(text: &mut String, children: &[docx_rs::ParagraphChild]) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                text.push_str(&extract_run_text(run));
            }
            docx_rs::ParagraphChild::Hyperlink(link) => {
                push_children_text(text, &link.children);
            }
            // Tracked insertions and deletions are not part of the text
            _ => {}
        }
    }
}

/// Extract text from a run
pub(crate) fn extract_run_text(run: &docx_rs::Run) -> String {
    let mut text = String::new();

    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text_elem) => {
                text.push_str(&text_elem.text);
            }
            docx_rs::RunChild::Tab(_) => {
                text.push('\t');
            }
            docx_rs::RunChild::Break(_) => {
                // Break types are private, so every break is a line break
                text.push('\n');
            }
            _ => {}
        }
    }

    text
}

/// Text of a table cell: its paragraphs joined by newlines
pub(crate) fn extract_cell_text(cell: &docx_rs::TableCell) -> String {
    let paragraphs: Vec<String> = cell
        .children
        .iter()
        .filter_map(|content| match content {
            docx_rs::TableCellContent::Paragraph(para) => Some(extract_paragraph_text(para)),
            // Nested tables are not flattened into the parent cell
            _ => None,
        })
        .collect();

    paragraphs.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Hyperlink, HyperlinkType, Insert, Paragraph, Run, TableCell};

    #[test]
    fn test_paragraph_text_concatenates_runs() {
        let para = Paragraph::new()
            .add_run(Run::new().add_text("Quarterly "))
            .add_run(Run::new().add_text("revenue").bold())
            .add_run(Run::new().add_tab().add_text("up"));

        assert_eq!(extract_paragraph_text(&para), "Quarterly revenue\tup");
    }

    #[test]
    fn test_paragraph_text_keeps_surrounding_whitespace() {
        let para = Paragraph::new().add_run(Run::new().add_text("  padded  "));
        assert_eq!(extract_paragraph_text(&para), "  padded  ");
    }

    #[test]
    fn test_paragraph_text_reads_hyperlinks_not_insertions() {
        let para = Paragraph::new()
            .add_run(Run::new().add_text("See "))
            .add_hyperlink(
                Hyperlink::new("https://example.com", HyperlinkType::External)
                    .add_run(Run::new().add_text("the site")),
            )
            .add_insert(Insert::new(Run::new().add_text(" (new)")));

        assert_eq!(extract_paragraph_text(&para), "See the site");
    }

    #[test]
    fn test_cell_text_joins_paragraphs() {
        let cell = TableCell::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("first")))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("second")));

        assert_eq!(extract_cell_text(&cell), "first\nsecond");
    }
}
