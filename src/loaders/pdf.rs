//! PDF extraction via page-ordered text collection.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lopdf::Document as PdfDocument;
use tracing::debug;

use super::Extractor;
use crate::models::{Document, DocumentType};
use crate::types::PipelineError;

/// Extracts page-ordered text from PDF files.
///
/// Pages whose extracted text is empty or whitespace-only are skipped; the
/// remaining pages are joined in page order, each prefixed with a
/// human-readable page marker. Parsing runs on the blocking thread pool so it
/// never stalls other concurrent extractions.
#[derive(Clone, Debug, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    async fn extract(&self, source: &str) -> Result<Document, PipelineError> {
        let path = PathBuf::from(source);
        debug!(path = %path.display(), "extracting pdf");

        let parse_path = path.clone();
        let (content, page_count) = tokio::task::spawn_blocking(move || extract_pages(&parse_path))
            .await
            .map_err(|err| PipelineError::extraction(source, err))?
            .map_err(|err| PipelineError::extraction(source, err))?;

        let title = file_stem(&path);
        Ok(Document::new(title, content, source, DocumentType::Pdf)
            .with_metadata("page_count", serde_json::json!(page_count))
            .with_metadata("extraction_method", serde_json::json!("lopdf")))
    }
}

/// Collects per-page text; any library-level failure aborts the document.
fn extract_pages(path: &Path) -> Result<(String, usize), lopdf::Error> {
    let doc = PdfDocument::load(path)?;
    let pages = doc.get_pages();
    let page_count = pages.len();

    let mut parts = Vec::new();
    for page_num in pages.keys() {
        let text = doc.extract_text(&[*page_num])?;
        if text.trim().is_empty() {
            continue;
        }
        parts.push(format!("Page {page_num}:\n{text}"));
    }

    Ok((parts.join("\n\n"), page_count))
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn corrupt_pdf_fails_with_extraction_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = PdfExtractor::new()
            .extract(path.to_str().unwrap())
            .await
            .unwrap_err();
        match err {
            PipelineError::ExtractionFailed { origin, .. } => {
                assert_eq!(origin, path.to_str().unwrap());
            }
            other => panic!("expected ExtractionFailed, got {other:?}"),
        }
    }

    #[test]
    fn file_stem_drops_extension() {
        assert_eq!(file_stem(Path::new("/tmp/report.v2.pdf")), "report.v2");
    }
}
