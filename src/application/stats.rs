use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::vector_store::VectorStore;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub records: usize,
    /// Dimension fixed by the first insert, if any.
    pub dimension: Option<usize>,
    /// What the configured embedder reports, 0 if unknown.
    pub embedder_dimension: usize,
}

impl StoreStats {
    /// True when the store already holds vectors of a different length than
    /// the configured embedder produces.
    pub fn dimension_drift(&self) -> bool {
        matches!(self.dimension, Some(d) if self.embedder_dimension > 0 && d != self.embedder_dimension)
    }
}

pub struct StatsUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
}

impl StatsUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, vector_store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, vector_store }
    }

    pub fn stats(&self) -> Result<StoreStats, DomainError> {
        Ok(StoreStats {
            records: self.vector_store.len()?,
            dimension: self.vector_store.dimension()?,
            embedder_dimension: self.embedder.dimension(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_only_when_both_known_and_different() {
        let stats = |dimension, embedder_dimension| StoreStats { records: 1, dimension, embedder_dimension };
        assert!(stats(Some(3), 4).dimension_drift());
        assert!(!stats(Some(3), 3).dimension_drift());
        assert!(!stats(None, 4).dimension_drift());
        assert!(!stats(Some(3), 0).dimension_drift());
    }
}
