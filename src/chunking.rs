//! Deterministic fixed-window chunking of document text.

use tracing::debug;
use uuid::Uuid;

use crate::models::{Document, TextChunk};
use crate::types::PipelineError;

/// Splits document content into non-overlapping word windows.
///
/// Chunking is pure: the same document content and chunk size always produce
/// the same chunk contents, offsets, and indices. For a document of `N` words
/// and chunk size `S`, exactly `ceil(N / S)` chunks are produced; every chunk
/// except possibly the last holds `S` words, and joining the chunk contents
/// in `chunk_index` order with single spaces reproduces the
/// whitespace-tokenized original.
#[derive(Clone, Debug)]
pub struct Chunker {
    chunk_size: usize,
}

impl Chunker {
    /// Creates a chunker emitting windows of `chunk_size` words.
    ///
    /// A zero chunk size is rejected with
    /// [`PipelineError::InvalidChunkSize`].
    pub fn new(chunk_size: usize) -> Result<Self, PipelineError> {
        if chunk_size == 0 {
            return Err(PipelineError::InvalidChunkSize(chunk_size));
        }
        Ok(Self { chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Chunks one document. A document with zero words yields an empty
    /// sequence, not an error.
    pub fn chunk_document(&self, document: &Document) -> Vec<TextChunk> {
        let words: Vec<&str> = document.content().split_whitespace().collect();
        let chunks: Vec<TextChunk> = words
            .chunks(self.chunk_size)
            .enumerate()
            .map(|(chunk_index, window)| {
                let start_index = chunk_index * self.chunk_size;
                TextChunk {
                    id: Uuid::new_v4(),
                    document_id: document.id(),
                    content: window.join(" "),
                    start_index,
                    end_index: start_index + window.len(),
                    chunk_index,
                    token_count: window.len(),
                }
            })
            .collect();

        debug!(
            document_id = %document.id(),
            words = words.len(),
            chunk_size = self.chunk_size,
            chunks = chunks.len(),
            "chunked document"
        );
        chunks
    }
}
