//! Document extraction — converts an uploaded CV into plain text.
//!
//! Supported formats are a closed set dispatched on the filename suffix.
//! Dispatch is exact and case-sensitive: `.txt`, `.pdf`, `.docx`. An
//! unrecognized suffix fails before any byte of the file is read.

use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// The format was recognized but the content could not be read or
    /// parsed. The original cause is chained as the source.
    #[error("could not read document: {0}")]
    Unreadable(#[source] anyhow::Error),
}

/// The closed set of supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves the format from the filename suffix, without touching the
    /// file itself.
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let extension = path.extension().and_then(|e| e.to_str());
        match extension {
            Some("txt") => Ok(Self::PlainText),
            Some("pdf") => Ok(Self::Pdf),
            Some("docx") => Ok(Self::Docx),
            Some(other) => Err(ExtractError::UnsupportedFormat(format!(".{other}"))),
            None => Err(ExtractError::UnsupportedFormat(
                path.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("<no filename>")
                    .to_string(),
            )),
        }
    }
}

/// Reads the document at `path` and returns its normalized text.
/// Page and paragraph breaks collapse to single newlines.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    match DocumentFormat::from_path(path)? {
        DocumentFormat::PlainText => read_plain_text(path),
        DocumentFormat::Pdf => read_pdf(path),
        DocumentFormat::Docx => read_docx(path),
    }
}

fn read_plain_text(path: &Path) -> Result<String, ExtractError> {
    std::fs::read_to_string(path).map_err(|e| ExtractError::Unreadable(e.into()))
}

fn read_pdf(path: &Path) -> Result<String, ExtractError> {
    // pdf-extract concatenates per-page text in page order with newlines.
    pdf_extract::extract_text(path).map_err(|e| ExtractError::Unreadable(e.into()))
}

fn read_docx(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|e| ExtractError::Unreadable(e.into()))?;
    let docx = docx_rs::read_docx(&bytes).map_err(|e| ExtractError::Unreadable(e.into()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::fs::File;
    use std::io::Write;

    fn write_docx(path: &Path, paragraphs: &[&str]) {
        let mut docx = Docx::new();
        for paragraph in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*paragraph)));
        }
        let file = File::create(path).unwrap();
        docx.build().pack(file).unwrap();
    }

    #[test]
    fn test_unrecognized_suffix_fails_before_any_read() {
        let dir = tempfile::tempdir().unwrap();
        // The path intentionally does not exist: dispatch must fail on the
        // suffix alone, without attempting a read.
        let path = dir.path().join("resume.rtf");
        let err = extract_text(&path).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_suffix_dispatch_is_case_sensitive() {
        let err = DocumentFormat::from_path(Path::new("resume.TXT")).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));

        let err = DocumentFormat::from_path(Path::new("resume.Pdf")).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_suffix_is_unsupported() {
        let err = DocumentFormat::from_path(Path::new("resume")).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_plain_text_reads_utf8_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        let mut file = File::create(&path).unwrap();
        file.write_all("Über-Engineer\nRust, Tokio".as_bytes()).unwrap();

        let text = extract_text(&path).unwrap();
        assert_eq!(text, "Über-Engineer\nRust, Tokio");
    }

    #[test]
    fn test_missing_txt_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = extract_text(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable(_)));
    }

    #[test]
    fn test_corrupt_pdf_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = extract_text(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable(_)));
    }

    #[test]
    fn test_corrupt_docx_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        let err = extract_text(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable(_)));
    }

    #[test]
    fn test_docx_paragraphs_join_with_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        write_docx(&path, &["Senior Rust Engineer", "Ten years of systems work"]);

        let text = extract_text(&path).unwrap();
        assert_eq!(text, "Senior Rust Engineer\nTen years of systems work");
    }

    #[test]
    fn test_txt_and_docx_extract_equivalent_content() {
        // Equivalent content in both formats extracts to equal text modulo
        // the structural separators, which both normalize to newlines.
        let dir = tempfile::tempdir().unwrap();

        let txt_path = dir.path().join("resume.txt");
        std::fs::write(&txt_path, "Line one\nLine two").unwrap();

        let docx_path = dir.path().join("resume.docx");
        write_docx(&docx_path, &["Line one", "Line two"]);

        assert_eq!(
            extract_text(&txt_path).unwrap(),
            extract_text(&docx_path).unwrap()
        );
    }
}
