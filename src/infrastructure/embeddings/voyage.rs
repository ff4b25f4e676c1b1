use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub struct VoyageProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct VoyageRequest<'a> {
    input: &'a [String],
    model: &'a str,
    input_type: &'static str,
}

#[derive(Deserialize)]
struct VoyageResponse {
    data: Vec<VoyageEmbedding>,
}

#[derive(Deserialize)]
struct VoyageEmbedding {
    embedding: Vec<f32>,
    index: usize,
}

impl VoyageResponse {
    /// Embeddings in input order; the API does not promise response order.
    fn into_ordered(mut self) -> Vec<Vec<f32>> {
        self.data.sort_by_key(|d| d.index);
        self.data.into_iter().map(|d| d.embedding).collect()
    }
}

impl VoyageProvider {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| "voyage-3-lite".to_string()),
            base_url: base_url.unwrap_or_else(|| "https://api.voyageai.com".to_string()),
        }
    }

    fn model_dimension(model: &str) -> usize {
        match model {
            "voyage-3-lite" => 512,
            "voyage-3" | "voyage-code-3" => 1024,
            "voyage-3-large" | "voyage-large-2" => 1536,
            _ => 0,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for VoyageProvider {
    async fn embed(
        &self,
        texts: &[String],
        input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        let input_type = match input_type {
            InputType::Document => "document",
            InputType::Query => "query",
        };
        let joined = texts.join("\n");

        let resp = self
            .client
            .post(format!("{}/v1/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&VoyageRequest {
                input: texts,
                model: &self.model,
                input_type,
            })
            .send()
            .await
            .map_err(|e| DomainError::embedding(&joined, format!("Voyage API error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::embedding(joined, format!("Voyage API {status}: {body}")));
        }

        let result: VoyageResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Voyage response: {e}")))?;
        Ok(result.into_ordered())
    }

    fn dimension(&self) -> usize {
        Self::model_dimension(&self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_reordered_by_index() {
        let body = r#"{"data": [
            {"embedding": [0.0, 1.0], "index": 2},
            {"embedding": [1.0, 0.0], "index": 0},
            {"embedding": [0.5, 0.5], "index": 1}
        ]}"#;
        let response: VoyageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.into_ordered(),
            vec![vec![1.0, 0.0], vec![0.5, 0.5], vec![0.0, 1.0]]
        );
    }

    #[test]
    fn test_known_and_unknown_model_dimensions() {
        assert_eq!(VoyageProvider::model_dimension("voyage-3"), 1024);
        assert_eq!(VoyageProvider::model_dimension("voyage-unreleased"), 0);
    }
}
