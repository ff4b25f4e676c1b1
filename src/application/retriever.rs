use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::retrieval::RetrievalResult;
use crate::domain::values::top_k::TopK;
use std::sync::Arc;
use tracing::debug;

/// Query-time layer over a [`VectorStore`]: resolves k and delegates.
pub struct Retriever {
    store: Arc<dyn VectorStore>,
    default_k: TopK,
}

impl Retriever {
    /// `default_k` below 1 is raised to 1.
    pub fn new(store: Arc<dyn VectorStore>, default_k: usize) -> Self {
        Self {
            store,
            default_k: TopK::clamped(default_k),
        }
    }

    pub fn default_k(&self) -> TopK {
        self.default_k
    }

    /// Top-k documents for `query_vector`. `None` uses the configured default;
    /// an explicit `Some(0)` is rejected.
    pub fn retrieve(&self, query_vector: &[f32], k: Option<usize>) -> Result<RetrievalResult, DomainError> {
        let k = match k {
            Some(k) => TopK::new(k).map_err(DomainError::InvalidArgument)?,
            None => self.default_k,
        };
        let results = self.store.query(query_vector, k)?;
        debug!(%k, hits = results.len(), "retrieved");
        Ok(results)
    }
}

/// Embeds a query text into exactly one vector. Every failure comes back as
/// `DomainError::Embedding` carrying the query.
pub(crate) async fn embed_query(embedder: &dyn EmbeddingProvider, query: &str) -> Result<Vec<f32>, DomainError> {
    let mut vectors = embedder
        .embed(&[query.to_string()], InputType::Query)
        .await
        .map_err(|e| match e {
            err @ DomainError::Embedding { .. } => err,
            other => DomainError::embedding(query, other.to_string()),
        })?;
    if vectors.len() != 1 {
        return Err(DomainError::embedding(
            query,
            format!("provider returned {} vectors for one text", vectors.len()),
        ));
    }
    Ok(vectors.remove(0))
}
