// Document text extraction for uploaded résumés.
//
// Only PDF and DOCX are accepted. Decoding is CPU-bound; async callers go through
// `extract_raw_text_async`, which runs it inside `tokio::task::spawn_blocking`.

use bytes::Bytes;
use docx_rs::{DocumentChild, Paragraph, ParagraphChild, RunChild};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX text extraction failed: {0}")]
    Docx(String),

    #[error("extraction task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Pdf,
    Docx,
}

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl MediaType {
    /// Recognizes a `Content-Type` value, ignoring parameters such as `charset`.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            PDF_MIME => Some(MediaType::Pdf),
            DOCX_MIME => Some(MediaType::Docx),
            _ => None,
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(MediaType::Pdf),
            "docx" => Some(MediaType::Docx),
            _ => None,
        }
    }

    /// Content type first, then the filename extension.
    pub fn detect(content_type: Option<&str>, filename: Option<&str>) -> Result<Self, DocumentError> {
        content_type
            .and_then(Self::from_content_type)
            .or_else(|| filename.and_then(Self::from_filename))
            .ok_or_else(|| {
                DocumentError::UnsupportedFormat(
                    content_type
                        .or(filename)
                        .unwrap_or("unknown")
                        .to_string(),
                )
            })
    }
}

/// An uploaded file, alive only for the duration of one extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub media_type: MediaType,
    pub filename: String,
}

pub fn extract_raw_text(document: &RawDocument) -> Result<String, DocumentError> {
    let text = match document.media_type {
        MediaType::Pdf => pdf_extract::extract_text_from_mem(&document.bytes)
            .map_err(|e| DocumentError::Pdf(format!("{}: {e}", document.filename)))?,
        MediaType::Docx => extract_docx_text(&document.bytes)
            .map_err(|e| DocumentError::Docx(format!("{}: {e}", document.filename)))?,
    };
    debug!(
        "Extracted {} chars from {} ({:?})",
        text.len(),
        document.filename,
        document.media_type
    );
    Ok(text)
}

pub async fn extract_raw_text_async(document: RawDocument) -> Result<String, DocumentError> {
    tokio::task::spawn_blocking(move || extract_raw_text(&document))
        .await
        .map_err(|e| DocumentError::Task(e.to_string()))?
}

/// Paragraph text joined by newlines; tables and images are skipped.
fn extract_docx_text(bytes: &[u8]) -> Result<String, String> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| format!("{e:?}"))?;
    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .filter(|text| !text.trim().is_empty())
        .collect();
    Ok(paragraphs.join("\n"))
}

fn paragraph_text(para: &Paragraph) -> String {
    para.children
        .iter()
        .filter_map(|child| match child {
            ParagraphChild::Run(run) => Some(run),
            _ => None,
        })
        .flat_map(|run| run.children.iter())
        .filter_map(|rc| match rc {
            RunChild::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect()
}
