//! Minimal end-to-end run: write a few sample files, ingest them, chunk,
//! and export the resulting dataset as JSONL.
//!
//! ```bash
//! cargo run --example export_pipeline
//! ```

use trainsmith::pipeline::{PipelineConfig, TrainingDataPipeline};
use trainsmith::{ExportFormat, PipelineError};

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let samples = std::env::temp_dir().join("trainsmith_samples");
    std::fs::create_dir_all(&samples)?;
    std::fs::write(
        samples.join("intro.md"),
        "# Intro\nTraining data starts as ordinary documents.",
    )?;
    std::fs::write(
        samples.join("facts.txt"),
        "The pipeline splits text into fixed-size word windows.",
    )?;
    std::fs::write(samples.join("config.json"), r#"{"chunk_size": 8}"#)?;

    let mut pipeline = TrainingDataPipeline::new(PipelineConfig {
        chunk_size: 8,
        ..PipelineConfig::default()
    })?;

    let outcome = pipeline
        .load_documents(&[samples.to_string_lossy().into_owned()])
        .await?;
    println!(
        "loaded {} documents ({} skipped)",
        outcome.documents.len(),
        outcome.skipped.len()
    );

    let dataset = pipeline.process_documents(None);
    println!(
        "dataset '{}' holds {} examples",
        dataset.name(),
        dataset.total_examples()
    );

    let out = std::env::temp_dir().join("trainsmith_output/dataset.jsonl");
    let written = pipeline
        .export_dataset(&dataset, &out, ExportFormat::Jsonl)
        .await?;
    println!("exported to {}", written.display());

    Ok(())
}
