use crate::domain::entities::document::Document;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::pipeline_stage::PipelineStage;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

pub struct IngestUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
}

impl IngestUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, vector_store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, vector_store }
    }

    /// Embeds every document, then writes the whole batch with one upsert.
    ///
    /// If any embedding fails the store is left untouched. Returns the number
    /// of records written.
    pub async fn execute(&self, documents: &[Document]) -> Result<usize, DomainError> {
        if documents.is_empty() {
            return Ok(0);
        }
        debug!(stage = %PipelineStage::Embedding, documents = documents.len());

        let mut ids = Vec::with_capacity(documents.len());
        let mut vectors = Vec::with_capacity(documents.len());
        let mut metadatas: Vec<BTreeMap<String, String>> = Vec::with_capacity(documents.len());

        for doc in documents {
            let vector = self.embed_document(doc).await?;
            ids.push(doc.id.clone());
            vectors.push(vector);
            metadatas.push(doc.stored_metadata());
        }

        self.vector_store.upsert(&ids, &vectors, &metadatas)?;
        info!(count = ids.len(), "ingested documents");
        Ok(ids.len())
    }

    async fn embed_document(&self, doc: &Document) -> Result<Vec<f32>, DomainError> {
        let wrap = |message: String| DomainError::Embedding {
            text: doc.text.clone(),
            message: format!("document {}: {message}", doc.id),
        };
        let mut vectors = self
            .embedder
            .embed(std::slice::from_ref(&doc.text), InputType::Document)
            .await
            .map_err(|e| match e {
                DomainError::Embedding { message, .. } => wrap(message),
                other => wrap(other.to_string()),
            })?;
        if vectors.len() != 1 {
            return Err(wrap(format!("provider returned {} vectors for one text", vectors.len())));
        }
        Ok(vectors.remove(0))
    }
}
