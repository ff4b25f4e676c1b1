use crate::domain::error::DomainError;
use crate::domain::ports::generation_port::GenerationProvider;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Text generation through the Hugging Face Inference API.
pub struct HuggingFaceGenerator {
    client: Client,
    token: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct TextGenerationRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
    options: Options,
}

#[derive(Serialize)]
struct Parameters {
    return_full_text: bool,
}

#[derive(Serialize)]
struct Options {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct GeneratedText {
    generated_text: String,
}

impl HuggingFaceGenerator {
    pub fn new(token: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            token,
            model: model.unwrap_or_else(|| "google/flan-t5-large".to_string()),
            base_url: base_url.unwrap_or_else(|| "https://router.huggingface.co/hf-inference".to_string()),
        }
    }
}

#[async_trait::async_trait]
impl GenerationProvider for HuggingFaceGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let url = format!("{}/models/{}", self.base_url, self.model);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&TextGenerationRequest {
                inputs: prompt,
                parameters: Parameters { return_full_text: false },
                options: Options { wait_for_model: true },
            })
            .send()
            .await
            .map_err(|e| DomainError::generation(format!("Hugging Face API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::generation(format!("Hugging Face API {status}: {body}")));
        }

        let outputs: Vec<GeneratedText> = resp
            .json()
            .await
            .map_err(|e| DomainError::generation(format!("Hugging Face response: {e}")))?;
        outputs
            .into_iter()
            .next()
            .map(|o| o.generated_text)
            .ok_or_else(|| DomainError::generation("Hugging Face response was empty"))
    }
}
