use crate::domain::error::DomainError;

/// Maps a prompt to generated text.
///
/// Adapters report failures as `DomainError::Generation`; the orchestrator
/// fills in the prompt and retrieved documents before returning it.
#[async_trait::async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}
