//! Unified dispatcher: routes sources to extractors, expands directories,
//! and isolates per-source failures in batch loads.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::detect::{detect_source, is_url};
use super::{Extractor, PdfExtractor, PlainTextExtractor, WebExtractor};
use crate::models::{Document, DocumentType};
use crate::types::PipelineError;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// A source that was dropped during directory or batch expansion, with the
/// reason it failed. Returned alongside documents for observability.
#[derive(Clone, Debug)]
pub struct SkippedSource {
    pub source: String,
    pub reason: String,
}

/// Result of a load call: successful documents in input order plus the
/// sources that were skipped along the way.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub documents: Vec<Document>,
    pub skipped: Vec<SkippedSource>,
}

struct ExtractJob {
    source: String,
    extractor: Arc<dyn Extractor>,
}

/// Routes each source to the matching extractor.
///
/// A single explicitly-named source surfaces its errors; sources discovered
/// while expanding a directory or processing a batch entry are recovered
/// locally (logged and recorded in [`LoadOutcome::skipped`]) so one malformed
/// document never blocks ingestion of the rest of a corpus. Extractions
/// across an expansion run concurrently on a bounded worker pool; output
/// order always matches input order regardless of completion order.
pub struct UnifiedLoader {
    pdf: Arc<PdfExtractor>,
    text: Arc<PlainTextExtractor>,
    web: Arc<WebExtractor>,
    max_workers: usize,
}

impl UnifiedLoader {
    pub fn new(fetch_timeout: Duration, max_workers: usize) -> Result<Self, PipelineError> {
        Ok(Self {
            pdf: Arc::new(PdfExtractor::new()),
            text: Arc::new(PlainTextExtractor::new()),
            web: Arc::new(WebExtractor::new(fetch_timeout)?),
            max_workers: max_workers.max(1),
        })
    }

    pub fn with_defaults() -> Result<Self, PipelineError> {
        Self::new(DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_WORKERS)
    }

    fn extractor_for(&self, kind: DocumentType) -> Option<Arc<dyn Extractor>> {
        match kind {
            DocumentType::Pdf => Some(self.pdf.clone() as Arc<dyn Extractor>),
            DocumentType::Txt
            | DocumentType::Md
            | DocumentType::Html
            | DocumentType::Json
            | DocumentType::Csv => Some(self.text.clone() as Arc<dyn Extractor>),
            DocumentType::Url => Some(self.web.clone() as Arc<dyn Extractor>),
            // Detected but no extractor is registered.
            DocumentType::Docx => None,
        }
    }

    /// Loads one explicitly-named source.
    ///
    /// A file or URL produces exactly one document and surfaces any error; a
    /// directory expands recursively with per-file failure isolation.
    pub async fn load(&self, source: &str) -> Result<LoadOutcome, PipelineError> {
        if is_url(source) {
            let document = self.web.extract(source).await?;
            return Ok(LoadOutcome {
                documents: vec![document],
                skipped: Vec::new(),
            });
        }

        let path = Path::new(source);
        if !path.exists() {
            return Err(PipelineError::SourceNotFound {
                origin: source.to_string(),
            });
        }

        if path.is_dir() {
            let jobs = self.expand_directory(path);
            return Ok(self.run_jobs(jobs).await);
        }

        let extractor = detect_source(source)?
            .and_then(|kind| self.extractor_for(kind))
            .ok_or_else(|| PipelineError::UnsupportedSource {
                origin: source.to_string(),
            })?;

        let document = extractor.extract(source).await?;
        Ok(LoadOutcome {
            documents: vec![document],
            skipped: Vec::new(),
        })
    }

    /// Loads an explicit list of sources with per-entry failure isolation.
    ///
    /// Successful documents are concatenated in input order; entries that
    /// fail to classify or extract are recorded as skipped, never aborting
    /// the batch.
    pub async fn load_batch<S: AsRef<str>>(
        &self,
        sources: &[S],
    ) -> Result<LoadOutcome, PipelineError> {
        let mut jobs = Vec::new();
        let mut planned_skips = Vec::new();

        for source in sources {
            let source = source.as_ref();
            if is_url(source) {
                jobs.push(ExtractJob {
                    source: source.to_string(),
                    extractor: self.web.clone(),
                });
                continue;
            }

            let path = Path::new(source);
            if !path.exists() {
                warn!(source, "skipping missing source");
                planned_skips.push(SkippedSource {
                    source: source.to_string(),
                    reason: "source not found".to_string(),
                });
                continue;
            }
            if path.is_dir() {
                jobs.extend(self.expand_directory(path));
                continue;
            }

            match detect_source(source)
                .ok()
                .flatten()
                .and_then(|kind| self.extractor_for(kind))
            {
                Some(extractor) => jobs.push(ExtractJob {
                    source: source.to_string(),
                    extractor,
                }),
                None => {
                    warn!(source, "skipping unsupported source");
                    planned_skips.push(SkippedSource {
                        source: source.to_string(),
                        reason: "unsupported source".to_string(),
                    });
                }
            }
        }

        let mut outcome = self.run_jobs(jobs).await;
        outcome.skipped.extend(planned_skips);
        info!(
            requested = sources.len(),
            loaded = outcome.documents.len(),
            skipped = outcome.skipped.len(),
            "batch load finished"
        );
        Ok(outcome)
    }

    /// Recursively enumerates files with a registered extractor, in a
    /// deterministic (file-name sorted) order. Files outside the supported
    /// set are passed over silently.
    fn expand_directory(&self, dir: &Path) -> Vec<ExtractJob> {
        let mut jobs = Vec::new();
        for entry in WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(extractor) = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(DocumentType::from_extension)
                .and_then(|kind| self.extractor_for(kind))
            else {
                continue;
            };
            jobs.push(ExtractJob {
                source: entry.path().to_string_lossy().into_owned(),
                extractor,
            });
        }
        debug!(dir = %dir.display(), candidates = jobs.len(), "expanded directory");
        jobs
    }

    /// Runs extractions concurrently, bounded by the worker pool size.
    ///
    /// `join_all` preserves job order, so output order matches input order no
    /// matter which extraction finishes first. Failures become skip records.
    /// Dropping the returned future cancels the whole load; results are only
    /// collected from completed extractions, so no partial document is ever
    /// exposed.
    async fn run_jobs(&self, jobs: Vec<ExtractJob>) -> LoadOutcome {
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let futures = jobs.into_iter().map(|job| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let result = match semaphore.acquire().await {
                    Ok(_permit) => job.extractor.extract(&job.source).await,
                    Err(err) => Err(PipelineError::Io(err.to_string())),
                };
                (job.source, result)
            }
        });

        let mut outcome = LoadOutcome::default();
        for (source, result) in join_all(futures).await {
            match result {
                Ok(document) => outcome.documents.push(document),
                Err(err) => {
                    warn!(source = %source, error = %err, "skipping source after failed extraction");
                    outcome.skipped.push(SkippedSource {
                        source,
                        reason: err.to_string(),
                    });
                }
            }
        }
        outcome
    }
}
