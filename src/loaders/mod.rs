//! Source loading: format detection, per-format extractors, and the
//! unified dispatcher with batch failure isolation.

pub mod detect;
pub mod pdf;
pub mod text;
pub mod unified;
pub mod web;

use async_trait::async_trait;

use crate::models::Document;
use crate::types::PipelineError;

pub use detect::detect_source;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;
pub use unified::{LoadOutcome, SkippedSource, UnifiedLoader};
pub use web::WebExtractor;

/// Capability for converting one raw source into a normalized [`Document`].
///
/// Implementations attach the source reference to any
/// [`PipelineError::ExtractionFailed`] they raise.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, source: &str) -> Result<Document, PipelineError>;
}
