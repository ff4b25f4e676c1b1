use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy)]
pub enum InputType {
    Document,
    Query,
}

/// Maps text to fixed-dimension vectors. Deterministic for a fixed model, and
/// every vector from one provider instance has the same length.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, texts: &[String], input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError>;
    /// Dimension of produced vectors, 0 when unknown until the first call.
    fn dimension(&self) -> usize;
}
