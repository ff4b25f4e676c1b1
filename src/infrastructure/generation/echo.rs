use crate::domain::error::DomainError;
use crate::domain::ports::generation_port::GenerationProvider;

/// Returns the prompt unchanged. Useful for inspecting what a real model
/// would receive.
pub struct EchoGenerator;

#[async_trait::async_trait]
impl GenerationProvider for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        Ok(prompt.to_string())
    }
}
