use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use reqwest::Client;
use serde::Serialize;

/// Embeddings from the Hugging Face Inference API feature-extraction pipeline.
pub struct HuggingFaceProvider {
    client: Client,
    token: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a [String],
    options: RequestOptions,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

impl HuggingFaceProvider {
    pub fn new(token: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            token,
            model: model.unwrap_or_else(|| "sentence-transformers/all-MiniLM-L6-v2".to_string()),
            base_url: base_url.unwrap_or_else(|| "https://router.huggingface.co/hf-inference".to_string()),
        }
    }

    fn model_dimension(model: &str) -> usize {
        match model {
            "sentence-transformers/all-MiniLM-L6-v2" | "sentence-transformers/all-MiniLM-L12-v2" => 384,
            "sentence-transformers/all-mpnet-base-v2" | "BAAI/bge-base-en-v1.5" => 768,
            "BAAI/bge-large-en-v1.5" => 1024,
            _ => 0,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HuggingFaceProvider {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        let joined = texts.join("\n");
        let url = format!("{}/models/{}/pipeline/feature-extraction", self.base_url, self.model);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&FeatureExtractionRequest {
                inputs: texts,
                options: RequestOptions { wait_for_model: true },
            })
            .send()
            .await
            .map_err(|e| DomainError::embedding(&joined, format!("Hugging Face API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::embedding(joined, format!("Hugging Face API {status}: {body}")));
        }

        resp.json::<Vec<Vec<f32>>>()
            .await
            .map_err(|e| DomainError::Parse(format!("Hugging Face response: {e}")))
    }

    fn dimension(&self) -> usize {
        Self::model_dimension(&self.model)
    }
}
