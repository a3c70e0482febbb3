use docx_rs::{Docx, Paragraph, Run};
use sidedoc::{Error, ParseError, load_document};
use std::io::Cursor;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("sidedoc-{}-{name}", std::process::id()))
}

fn sample_docx() -> Vec<u8> {
    let docx = Docx::new()
        .add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Overview"))
                .style("Heading1"),
        )
        .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Body text")));

    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).expect("Failed to pack docx");
    cursor.into_inner()
}

#[tokio::test]
async fn test_load_document_from_disk() {
    let path = temp_path("quarterly-report.docx");
    std::fs::write(&path, sample_docx()).unwrap();

    let document = load_document(&path).await.expect("Failed to load document");
    std::fs::remove_file(&path).ok();

    assert_eq!(document.title, format!("sidedoc-{}-quarterly-report", std::process::id()));
    let texts: Vec<&str> = document.paragraphs().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["Overview", "Body text"]);
    assert_eq!(
        document.paragraphs().next().unwrap().style.as_deref(),
        Some("Heading1")
    );
}

#[tokio::test]
async fn test_wrong_extension_rejected() {
    let result = load_document(&PathBuf::from("budget.xlsx")).await;
    match result {
        Err(Error::Parse(ParseError::InvalidFormat(message))) => {
            assert!(message.contains("Expected .docx"));
        }
        other => panic!("expected invalid format, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_file_is_parse_error() {
    let result = load_document(&temp_path("does-not-exist.docx")).await;
    assert!(matches!(result, Err(Error::Parse(ParseError::Io(_)))));
}
