//! Wraps chunks into training examples and aggregates them into a dataset.

use tracing::info;

use crate::chunking::Chunker;
use crate::models::{Dataset, Document, TaskType, TrainingExample};

/// Builds a [`Dataset`] by chunking each document and wrapping every chunk
/// into an unlabeled [`TrainingExample`].
///
/// Chunk order is preserved within a document and document order across
/// documents; a dataset with zero examples is valid.
pub fn assemble_dataset(
    name: impl Into<String>,
    description: impl Into<String>,
    documents: &[Document],
    chunker: &Chunker,
    task_type: TaskType,
) -> Dataset {
    let mut examples = Vec::new();
    for document in documents {
        for chunk in chunker.chunk_document(document) {
            examples.push(
                TrainingExample::new(chunk.content, task_type)
                    .with_source_document(document.id()),
            );
        }
    }

    let dataset = Dataset::new(name, description, examples);
    info!(
        dataset_id = %dataset.id(),
        documents = documents.len(),
        examples = dataset.total_examples(),
        "assembled dataset"
    );
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentType;

    #[test]
    fn preserves_document_and_chunk_order() {
        let docs = vec![
            Document::new("first", "a b c", "mem", DocumentType::Txt),
            Document::new("second", "d e", "mem", DocumentType::Txt),
        ];
        let chunker = Chunker::new(2).unwrap();
        let dataset = assemble_dataset("d", "desc", &docs, &chunker, TaskType::Chunking);

        let inputs: Vec<&str> = dataset
            .examples()
            .iter()
            .map(|ex| ex.input_text.as_str())
            .collect();
        assert_eq!(inputs, vec!["a b", "c", "d e"]);
        assert_eq!(dataset.total_examples(), 3);

        assert_eq!(
            dataset.examples()[0].source_document_id,
            Some(docs[0].id())
        );
        assert_eq!(
            dataset.examples()[2].source_document_id,
            Some(docs[1].id())
        );
        assert!(dataset.examples().iter().all(|ex| ex.output_text.is_empty()));
    }

    #[test]
    fn empty_documents_yield_an_empty_dataset() {
        let docs = vec![Document::new("empty", "", "mem", DocumentType::Txt)];
        let chunker = Chunker::new(8).unwrap();
        let dataset = assemble_dataset("d", "desc", &docs, &chunker, TaskType::Chunking);
        assert!(dataset.is_empty());
        assert_eq!(dataset.total_examples(), 0);
    }
}
