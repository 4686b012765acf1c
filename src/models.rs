//! Core data model: documents, chunks, training examples, and datasets.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of sources the pipeline can classify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Txt,
    Md,
    Html,
    Json,
    Csv,
    Docx,
    Url,
}

impl DocumentType {
    /// Classifies a lowercase file extension (no leading dot).
    ///
    /// Returns `None` for extensions outside the supported set.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Txt),
            "md" => Some(Self::Md),
            "html" | "htm" => Some(Self::Html),
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Txt => "txt",
            Self::Md => "md",
            Self::Html => "html",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Docx => "docx",
            Self::Url => "url",
        }
    }
}

/// Normalized extracted text plus source metadata.
///
/// Immutable once created: `word_count` is derived from `content` at
/// construction time and the content is never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    title: String,
    content: String,
    source: String,
    doc_type: DocumentType,
    word_count: usize,
    created_at: DateTime<Utc>,
    metadata: BTreeMap<String, serde_json::Value>,
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
        doc_type: DocumentType,
    ) -> Self {
        let content = content.into();
        let word_count = content.split_whitespace().count();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content,
            source: source.into(),
            doc_type,
            word_count,
            created_at: Utc::now(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a free-form metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn doc_type(&self) -> DocumentType {
        self.doc_type
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }
}

/// A fixed-size, non-overlapping word window over one document's content.
///
/// `start_index` and `end_index` are word offsets into the source content, so
/// concatenating all chunks of a document in `chunk_index` order reconstructs
/// the whitespace-tokenized original exactly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextChunk {
    pub id: Uuid,
    pub document_id: Uuid,
    pub content: String,
    pub start_index: usize,
    pub end_index: usize,
    pub chunk_index: usize,
    pub token_count: usize,
}

/// Task labels a training example can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Chunking,
    QaGeneration,
    Classification,
    Summarization,
    NamedEntityRecognition,
    RedTeaming,
    InstructionResponse,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chunking => "chunking",
            Self::QaGeneration => "qa_generation",
            Self::Classification => "classification",
            Self::Summarization => "summarization",
            Self::NamedEntityRecognition => "named_entity_recognition",
            Self::RedTeaming => "red_teaming",
            Self::InstructionResponse => "instruction_response",
        }
    }
}

/// A chunk wrapped with task labeling fields, initially unlabeled.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrainingExample {
    pub id: Uuid,
    pub input_text: String,
    /// Empty until a label generator fills it in.
    pub output_text: String,
    pub task_type: TaskType,
    pub source_document_id: Option<Uuid>,
    /// Populated externally by a quality evaluator; forwarded verbatim.
    pub quality_scores: Option<BTreeMap<String, f64>>,
}

impl TrainingExample {
    pub fn new(input_text: impl Into<String>, task_type: TaskType) -> Self {
        Self {
            id: Uuid::new_v4(),
            input_text: input_text.into(),
            output_text: String::new(),
            task_type,
            source_document_id: None,
            quality_scores: None,
        }
    }

    #[must_use]
    pub fn with_source_document(mut self, document_id: Uuid) -> Self {
        self.source_document_id = Some(document_id);
        self
    }

    #[must_use]
    pub fn with_quality_scores(mut self, scores: BTreeMap<String, f64>) -> Self {
        self.quality_scores = Some(scores);
        self
    }
}

/// Ordered collection of training examples with summary metadata.
///
/// `total_examples` always equals `examples.len()`; the field is maintained
/// by construction and there is no way to push examples after the fact.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dataset {
    id: Uuid,
    name: String,
    description: String,
    examples: Vec<TrainingExample>,
    total_examples: usize,
}

impl Dataset {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        examples: Vec<TrainingExample>,
    ) -> Self {
        let total_examples = examples.len();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            examples,
            total_examples,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn total_examples(&self) -> usize {
        self.total_examples
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

/// Export formats the exporter knows how to name.
///
/// Only JSONL has a registered writer; requesting anything else fails with
/// [`crate::types::PipelineError::UnsupportedExportFormat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Jsonl,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jsonl => "jsonl",
            Self::Csv => "csv",
        }
    }
}
