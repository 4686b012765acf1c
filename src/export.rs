//! Serializes datasets to durable on-disk formats.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

use crate::models::{Dataset, ExportFormat, TaskType};
use crate::types::PipelineError;

/// One exported line of the JSONL format.
#[derive(Serialize)]
struct ExportRecord<'a> {
    id: Uuid,
    input_text: &'a str,
    output_text: &'a str,
    task_type: TaskType,
    source_document_id: Option<Uuid>,
    quality_scores: Option<&'a BTreeMap<String, f64>>,
}

/// Writes datasets to disk, one record per training example.
#[derive(Clone, Debug, Default)]
pub struct DatasetExporter;

impl DatasetExporter {
    pub fn new() -> Self {
        Self
    }

    /// Exports `dataset` to `output_path` in the requested format.
    ///
    /// Missing parent directories are created. Errors are always surfaced;
    /// the write is not transactional, so a failure mid-write can leave a
    /// partial file behind.
    pub async fn export(
        &self,
        dataset: &Dataset,
        output_path: impl AsRef<Path>,
        format: ExportFormat,
    ) -> Result<PathBuf, PipelineError> {
        let path = output_path.as_ref().to_path_buf();

        info!(
            dataset = dataset.name(),
            examples = dataset.total_examples(),
            path = %path.display(),
            format = format.as_str(),
            "exporting dataset"
        );

        match format {
            ExportFormat::Jsonl => self.export_jsonl(dataset, &path).await?,
            other => {
                return Err(PipelineError::UnsupportedExportFormat(
                    other.as_str().to_string(),
                ))
            }
        }

        info!(path = %path.display(), "dataset exported");
        Ok(path)
    }

    /// One JSON object per example per line, UTF-8, newline-terminated.
    /// Line order matches `dataset.examples()` order.
    async fn export_jsonl(&self, dataset: &Dataset, path: &Path) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut out = String::new();
        for example in dataset.examples() {
            let record = ExportRecord {
                id: example.id,
                input_text: &example.input_text,
                output_text: &example.output_text,
                task_type: example.task_type,
                source_document_id: example.source_document_id,
                quality_scores: example.quality_scores.as_ref(),
            };
            let line =
                serde_json::to_string(&record).map_err(|err| PipelineError::Io(err.to_string()))?;
            out.push_str(&line);
            out.push('\n');
        }

        fs::write(path, out).await?;
        Ok(())
    }
}
