//! Plain-text and markup extraction for txt, md, html, csv, and json files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::pdf::file_stem;
use super::Extractor;
use crate::models::{Document, DocumentType};
use crate::types::PipelineError;

/// Reads textual files verbatim with lossy UTF-8 decoding; invalid byte
/// sequences are dropped rather than kept as replacement characters, so they
/// never count as words.
///
/// JSON files are parsed and re-serialized compactly, which doubles as a
/// well-formedness check; everything else is used byte-for-byte as content.
#[derive(Clone, Debug, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn classify(path: &Path) -> Option<DocumentType> {
        let kind = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(DocumentType::from_extension)?;
        match kind {
            DocumentType::Txt
            | DocumentType::Md
            | DocumentType::Html
            | DocumentType::Json
            | DocumentType::Csv => Some(kind),
            _ => None,
        }
    }
}

#[async_trait]
impl Extractor for PlainTextExtractor {
    async fn extract(&self, source: &str) -> Result<Document, PipelineError> {
        let path = PathBuf::from(source);
        let doc_type = Self::classify(&path).ok_or_else(|| PipelineError::UnsupportedSource {
            origin: source.to_string(),
        })?;

        debug!(path = %path.display(), kind = doc_type.as_str(), "extracting text file");
        let bytes = fs::read(&path)
            .await
            .map_err(|err| PipelineError::extraction(source, err))?;

        let content = match doc_type {
            DocumentType::Json => {
                let value: serde_json::Value = serde_json::from_slice(&bytes)
                    .map_err(|err| PipelineError::extraction(source, err))?;
                serde_json::to_string(&value)
                    .map_err(|err| PipelineError::extraction(source, err))?
            }
            _ => decode_dropping_invalid(&bytes),
        };

        Ok(Document::new(file_stem(&path), content, source, doc_type))
    }
}

fn decode_dropping_invalid(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|ch| *ch != char::REPLACEMENT_CHARACTER)
        .collect()
}
