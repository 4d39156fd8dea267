//! Plain-text extraction from uploaded documents.
//!
//! Supports `.txt`, `.docx` and `.pdf`, selected by the file name's extension
//! (case-insensitive). Parsing of binary formats runs on the blocking pool.

use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while extracting text from a document.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// File extension is not one of the supported types.
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// The document parsed but contains no non-whitespace text.
    #[error("No extractable text found")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOCX extraction error: {0}")]
    Docx(String),

    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// Task join error from spawn_blocking.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Docx,
    Pdf,
}

impl DocumentKind {
    /// Detect the format from a file name, ignoring case.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if lower.ends_with(".txt") {
            Some(Self::PlainText)
        } else if lower.ends_with(".docx") {
            Some(Self::Docx)
        } else if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else {
            None
        }
    }
}

/// Extension of `file_name` for error reporting, or the whole name if it has none.
fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_else(|| file_name.to_string())
}

/// Extract the text of the file at `path`. `file_name` is the original upload
/// name and is only used to pick the format.
pub async fn extract_text(path: &Path, file_name: &str) -> ExtractResult<String> {
    let kind = DocumentKind::from_file_name(file_name)
        .ok_or_else(|| ExtractError::UnsupportedType(extension_of(file_name)))?;

    let text = match kind {
        DocumentKind::PlainText => {
            let bytes = tokio::fs::read(path).await?;
            decode_lossy(&bytes)
        }
        DocumentKind::Docx => {
            let path = path.to_path_buf();
            tokio::task::spawn_blocking(move || extract_docx(&path)).await??
        }
        DocumentKind::Pdf => {
            let path = path.to_path_buf();
            tokio::task::spawn_blocking(move || extract_pdf(&path)).await??
        }
    };

    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }

    debug!("Extracted {} chars from {} ({:?})", text.chars().count(), file_name, kind);
    Ok(text)
}

/// Decode UTF-8, dropping invalid byte sequences instead of replacing them.
fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Join the text of every body paragraph, one per line. Empty paragraphs
/// become empty lines.
fn extract_docx(path: &Path) -> ExtractResult<String> {
    let content = std::fs::read(path)?;
    let docx = docx_rs::read_docx(&content)
        .map_err(|e| ExtractError::Docx(format!("Failed to parse DOCX: {}", e)))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(p: &docx_rs::Paragraph) -> String {
    let mut text = String::new();

    for child in &p.children {
        match child {
            ParagraphChild::Run(r) => push_run_text(&mut text, r),
            ParagraphChild::Hyperlink(h) => {
                for child in &h.children {
                    if let ParagraphChild::Run(r) = child {
                        push_run_text(&mut text, r);
                    }
                }
            }
            _ => {}
        }
    }

    text
}

fn push_run_text(text: &mut String, run: &docx_rs::Run) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

/// Extract every page in order. Pages that fail or yield no text are skipped.
fn extract_pdf(path: &Path) -> ExtractResult<String> {
    let doc = lopdf::Document::load(path)
        .map_err(|e| ExtractError::Pdf(format!("Failed to parse PDF: {}", e)))?;

    let mut pages = Vec::new();
    for page_number in doc.get_pages().keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(text) => {
                let text = text.trim_end_matches(['\r', '\n']);
                if text.trim().is_empty() {
                    debug!("PDF page {} has no text, skipping", page_number);
                } else {
                    pages.push(text.to_string());
                }
            }
            Err(e) => warn!("Skipping PDF page {}: {}", page_number, e),
        }
    }

    Ok(pages.join("\n"))
}
