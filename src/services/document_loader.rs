// Document Loader
// Extracts article text from plain text, DOCX or PDF files

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unsupported file type: {0}")]
    Unsupported(String),
    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse DOCX: {0}")]
    Docx(String),
    #[error("Failed to extract PDF text: {0}")]
    Pdf(String),
}

/// Read an article from disk, dispatching on the file extension
pub fn load_document(path: &Path) -> Result<String, DocumentError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let extract: fn(&[u8]) -> Result<String, DocumentError> = match ext.as_str() {
        "txt" | "md" | "text" | "" => |bytes: &[u8]| Ok(String::from_utf8_lossy(bytes).into_owned()),
        "docx" => extract_docx_text,
        "pdf" => |bytes: &[u8]| pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string())),
        other => return Err(DocumentError::Unsupported(other.to_string())),
    };

    let text = extract(&fs::read(path)?)?;

    debug!(path = %path.display(), chars = text.chars().count(), "document.loaded");
    Ok(text)
}

/// Paragraph text joined with blank lines; non-text runs are skipped.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| DocumentError::Docx(e.to_string()))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        let DocumentChild::Paragraph(paragraph) = child else {
            continue;
        };
        let mut line = String::new();
        for p_child in &paragraph.children {
            if let ParagraphChild::Run(run) = p_child {
                for r_child in &run.children {
                    if let RunChild::Text(t) = r_child {
                        line.push_str(&t.text);
                    }
                }
            }
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paragraphs.push(trimmed.to_string());
        }
    }

    Ok(paragraphs.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("article.txt");
        fs::write(&path, "Officials confirmed the report.").unwrap();
        assert_eq!(load_document(&path).unwrap(), "Officials confirmed the report.");
    }

    #[test]
    fn test_unsupported_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("article.xlsx");
        fs::write(&path, b"binary").unwrap();
        assert!(matches!(load_document(&path), Err(DocumentError::Unsupported(ext)) if ext == "xlsx"));
    }

    #[test]
    fn test_extension_checked_before_reading() {
        let err = load_document(Path::new("/nonexistent/report.xlsx")).unwrap_err();
        assert!(matches!(err, DocumentError::Unsupported(ext) if ext == "xlsx"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_document(Path::new("/nonexistent/article.txt")).unwrap_err();
        assert!(matches!(err, DocumentError::Read(_)));
    }

    #[test]
    fn test_invalid_docx_is_reported() {
        assert!(matches!(extract_docx_text(b"not a zip"), Err(DocumentError::Docx(_))));
    }
}
