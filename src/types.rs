use thiserror::Error;

/// Errors surfaced by the ingestion, chunking, and export pipeline.
///
/// Failures encountered while expanding a directory or processing one entry
/// of an explicit batch are recovered locally by the dispatcher; everything
/// else propagates to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("source not found: {origin}")]
    SourceNotFound { origin: String },
    #[error("unsupported source: {origin}")]
    UnsupportedSource { origin: String },
    #[error("extraction failed for {origin}: {reason}")]
    ExtractionFailed { origin: String, reason: String },
    #[error("unsupported export format: {0}")]
    UnsupportedExportFormat(String),
    #[error("chunk size must be positive, got {0}")]
    InvalidChunkSize(usize),
    #[error("io error: {0}")]
    Io(String),
}

impl PipelineError {
    /// Wraps an extractor-level failure with the offending source attached.
    pub fn extraction(origin: impl Into<String>, reason: impl ToString) -> Self {
        Self::ExtractionFailed {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
