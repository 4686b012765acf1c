//! Top-level orchestrator tying loading, chunking, assembly, and export
//! together.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use crate::assembler::assemble_dataset;
use crate::chunking::Chunker;
use crate::export::DatasetExporter;
use crate::loaders::unified::{DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_WORKERS};
use crate::loaders::{LoadOutcome, UnifiedLoader};
use crate::models::{Dataset, Document, ExportFormat, TaskType};
use crate::types::PipelineError;

/// Pipeline-wide knobs with the stock defaults.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Words per chunk.
    pub chunk_size: usize,
    /// Upper bound on concurrent extractions within one batch.
    pub max_workers: usize,
    /// Per-request timeout for web fetches.
    pub fetch_timeout: Duration,
    pub dataset_name: String,
    pub dataset_description: String,
    pub task_type: TaskType,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 512,
            max_workers: DEFAULT_MAX_WORKERS,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            dataset_name: "dataset_1".to_string(),
            dataset_description: "Automatically created dataset".to_string(),
            task_type: TaskType::Chunking,
        }
    }
}

/// Owns the document and dataset collections across a pipeline run and
/// exposes the load → chunk → assemble → export flow.
pub struct TrainingDataPipeline {
    config: PipelineConfig,
    loader: UnifiedLoader,
    chunker: Chunker,
    exporter: DatasetExporter,
    documents: HashMap<Uuid, Document>,
    // Ids in the order documents were recorded; the map alone would lose it.
    load_order: Vec<Uuid>,
    datasets: HashMap<Uuid, Dataset>,
}

impl TrainingDataPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let loader = UnifiedLoader::new(config.fetch_timeout, config.max_workers)?;
        let chunker = Chunker::new(config.chunk_size)?;
        Ok(Self {
            config,
            loader,
            chunker,
            exporter: DatasetExporter::new(),
            documents: HashMap::new(),
            load_order: Vec::new(),
            datasets: HashMap::new(),
        })
    }

    pub fn with_defaults() -> Result<Self, PipelineError> {
        Self::new(PipelineConfig::default())
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Documents loaded so far, keyed by id.
    pub fn documents(&self) -> &HashMap<Uuid, Document> {
        &self.documents
    }

    /// Datasets assembled so far, keyed by id.
    pub fn datasets(&self) -> &HashMap<Uuid, Dataset> {
        &self.datasets
    }

    /// Loads a batch of sources (files, directories, URLs) with per-entry
    /// failure isolation and records the successful documents.
    pub async fn load_documents<S: AsRef<str>>(
        &mut self,
        sources: &[S],
    ) -> Result<LoadOutcome, PipelineError> {
        let outcome = self.loader.load_batch(sources).await?;
        for document in &outcome.documents {
            self.record_document(document);
        }
        info!(
            loaded = outcome.documents.len(),
            skipped = outcome.skipped.len(),
            total = self.documents.len(),
            "documents loaded"
        );
        Ok(outcome)
    }

    /// Loads one explicitly-named source, surfacing its errors.
    pub async fn load_source(&mut self, source: &str) -> Result<Vec<Document>, PipelineError> {
        let outcome = self.loader.load(source).await?;
        for document in &outcome.documents {
            self.record_document(document);
        }
        Ok(outcome.documents)
    }

    fn record_document(&mut self, document: &Document) {
        if self
            .documents
            .insert(document.id(), document.clone())
            .is_none()
        {
            self.load_order.push(document.id());
        }
    }

    /// Chunks the given documents (or everything loaded so far) into an
    /// unlabeled dataset and records it.
    pub fn process_documents(&mut self, documents: Option<&[Document]>) -> Dataset {
        let owned: Vec<Document>;
        let documents = match documents {
            Some(docs) => docs,
            None => {
                owned = self
                    .load_order
                    .iter()
                    .filter_map(|id| self.documents.get(id).cloned())
                    .collect();
                &owned
            }
        };

        let dataset = assemble_dataset(
            &self.config.dataset_name,
            &self.config.dataset_description,
            documents,
            &self.chunker,
            self.config.task_type,
        );
        self.datasets.insert(dataset.id(), dataset.clone());
        dataset
    }

    /// Serializes a dataset to disk, creating parent directories as needed.
    pub async fn export_dataset(
        &self,
        dataset: &Dataset,
        output_path: impl AsRef<Path>,
        format: ExportFormat,
    ) -> Result<PathBuf, PipelineError> {
        self.exporter.export(dataset, output_path, format).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentType;
    use tempfile::tempdir;

    #[tokio::test]
    async fn process_documents_uses_loaded_collection_in_load_order() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a b c").unwrap();

        let mut pipeline = TrainingDataPipeline::new(PipelineConfig {
            chunk_size: 2,
            ..PipelineConfig::default()
        })
        .unwrap();

        pipeline
            .load_documents(&[dir.path().to_string_lossy().into_owned()])
            .await
            .unwrap();
        assert_eq!(pipeline.documents().len(), 1);

        let dataset = pipeline.process_documents(None);
        assert_eq!(dataset.total_examples(), 2);
        assert_eq!(pipeline.datasets().len(), 1);
    }

    #[tokio::test]
    async fn default_dataset_follows_load_order_not_completion_order() {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::GET).path("/slow");
                then.status(200)
                    .header("content-type", "text/plain")
                    .body("remote words")
                    .delay(Duration::from_millis(300));
            })
            .await;

        let dir = tempdir().unwrap();
        let local = dir.path().join("local.txt");
        std::fs::write(&local, "local words").unwrap();

        let mut pipeline = TrainingDataPipeline::new(PipelineConfig {
            chunk_size: 8,
            ..PipelineConfig::default()
        })
        .unwrap();
        pipeline
            .load_documents(&[server.url("/slow"), local.to_string_lossy().into_owned()])
            .await
            .unwrap();

        let dataset = pipeline.process_documents(None);
        let contents: Vec<&str> = dataset
            .examples()
            .iter()
            .map(|example| example.input_text.as_str())
            .collect();
        assert_eq!(contents, ["remote words", "local words"]);
    }

    #[tokio::test]
    async fn explicit_documents_override_the_collection() {
        let mut pipeline = TrainingDataPipeline::new(PipelineConfig {
            chunk_size: 4,
            ..PipelineConfig::default()
        })
        .unwrap();

        let doc = Document::new("inline", "w1 w2 w3 w4 w5", "mem", DocumentType::Txt);
        let dataset = pipeline.process_documents(Some(std::slice::from_ref(&doc)));
        assert_eq!(dataset.total_examples(), 2);
        assert_eq!(
            dataset.examples()[0].source_document_id,
            Some(doc.id())
        );
    }

    #[test]
    fn invalid_chunk_size_is_rejected_at_construction() {
        let result = TrainingDataPipeline::new(PipelineConfig {
            chunk_size: 0,
            ..PipelineConfig::default()
        });
        assert!(matches!(result, Err(PipelineError::InvalidChunkSize(0))));
    }
}
