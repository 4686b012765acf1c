//! Document ingestion, deterministic chunking, and training-dataset
//! assembly with JSONL export.
//!
//! ```text
//! Sources (files / dirs / URLs) ──► loaders::UnifiedLoader ──► Document
//!                                        │
//!                                        ├─► loaders::pdf / text / web
//!                                        └─► per-source failure isolation
//!
//! Document ──► chunking::Chunker ──► TextChunk windows
//!
//! TextChunks ──► assembler::assemble_dataset ──► Dataset
//!
//! Dataset ──► export::DatasetExporter ──► JSONL on disk
//! ```
//!
//! [`pipeline::TrainingDataPipeline`] wires the stages together and owns the
//! document and dataset collections across a run.

pub mod assembler;
pub mod chunking;
pub mod export;
pub mod loaders;
pub mod models;
pub mod pipeline;
pub mod quality;
pub mod types;

pub use assembler::assemble_dataset;
pub use chunking::Chunker;
pub use export::DatasetExporter;
pub use loaders::{LoadOutcome, SkippedSource, UnifiedLoader};
pub use models::{
    Dataset, Document, DocumentType, ExportFormat, TaskType, TextChunk, TrainingExample,
};
pub use pipeline::{PipelineConfig, TrainingDataPipeline};
pub use types::PipelineError;
