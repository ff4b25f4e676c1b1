//! Pipeline configuration.
//!
//! Every recognised setting is a field of [`PipelineConfig`]. Values come from
//! `RAGPIPE_*` environment variables and are validated when the config is
//! built, so a bad provider name or a missing token fails before any model
//! or store is touched.

use crate::domain::error::DomainError;
use crate::domain::values::empty_retrieval::EmptyRetrievalPolicy;
use crate::domain::values::top_k::DEFAULT_TOP_K;
use std::fmt;
use std::str::FromStr;

pub const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    Hashing,
    OpenAi,
    Voyage,
    HuggingFace,
}

impl EmbeddingBackend {
    pub fn is_remote(&self) -> bool {
        !matches!(self, EmbeddingBackend::Hashing)
    }
}

impl fmt::Display for EmbeddingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingBackend::Hashing => write!(f, "hashing"),
            EmbeddingBackend::OpenAi => write!(f, "openai"),
            EmbeddingBackend::Voyage => write!(f, "voyage"),
            EmbeddingBackend::HuggingFace => write!(f, "huggingface"),
        }
    }
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hashing" => Ok(EmbeddingBackend::Hashing),
            "openai" => Ok(EmbeddingBackend::OpenAi),
            "voyage" => Ok(EmbeddingBackend::Voyage),
            "huggingface" | "hf" => Ok(EmbeddingBackend::HuggingFace),
            _ => Err(format!("Unknown embedding provider: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationBackend {
    Echo,
    OpenAi,
    HuggingFace,
}

impl GenerationBackend {
    pub fn is_remote(&self) -> bool {
        !matches!(self, GenerationBackend::Echo)
    }
}

impl fmt::Display for GenerationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationBackend::Echo => write!(f, "echo"),
            GenerationBackend::OpenAi => write!(f, "openai"),
            GenerationBackend::HuggingFace => write!(f, "huggingface"),
        }
    }
}

impl FromStr for GenerationBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "echo" => Ok(GenerationBackend::Echo),
            "openai" => Ok(GenerationBackend::OpenAi),
            "huggingface" | "hf" => Ok(GenerationBackend::HuggingFace),
            _ => Err(format!("Unknown generation provider: {s}")),
        }
    }
}

#[derive(Clone)]
pub struct PipelineConfig {
    pub embedding_provider: EmbeddingBackend,
    /// Provider default when `None`.
    pub embedding_model: Option<String>,
    pub generation_provider: GenerationBackend,
    pub generation_model: Option<String>,
    /// Bearer token shared by remote providers.
    pub credential_token: String,
    /// SQLite path, or `:memory:` for the in-memory store.
    pub db_path: String,
    pub default_top_k: usize,
    pub empty_retrieval: EmptyRetrievalPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            embedding_provider: EmbeddingBackend::Hashing,
            embedding_model: None,
            generation_provider: GenerationBackend::Echo,
            generation_model: None,
            credential_token: String::new(),
            db_path: "./ragpipe.db".to_string(),
            default_top_k: DEFAULT_TOP_K,
            empty_retrieval: EmptyRetrievalPolicy::default(),
        }
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("embedding_provider", &self.embedding_provider)
            .field("embedding_model", &self.embedding_model)
            .field("generation_provider", &self.generation_provider)
            .field("generation_model", &self.generation_model)
            .field("credential_token", &if self.credential_token.is_empty() { "" } else { "<redacted>" })
            .field("db_path", &self.db_path)
            .field("default_top_k", &self.default_top_k)
            .field("empty_retrieval", &self.empty_retrieval)
            .finish()
    }
}

impl PipelineConfig {
    /// Reads `RAGPIPE_*` environment variables and validates the result.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let mut config = Self::default();

        if let Some(v) = lookup("RAGPIPE_EMBEDDING_PROVIDER") {
            config.embedding_provider = v.parse().map_err(DomainError::Config)?;
        }
        config.embedding_model = lookup("RAGPIPE_EMBEDDING_MODEL");
        if let Some(v) = lookup("RAGPIPE_GENERATION_PROVIDER") {
            config.generation_provider = v.parse().map_err(DomainError::Config)?;
        }
        config.generation_model = lookup("RAGPIPE_GENERATION_MODEL");
        if let Some(v) = lookup("RAGPIPE_API_TOKEN") {
            config.credential_token = v;
        }
        if let Some(v) = lookup("RAGPIPE_DB") {
            config.db_path = v;
        }
        if let Some(v) = lookup("RAGPIPE_TOP_K") {
            config.default_top_k = v
                .trim()
                .parse()
                .map_err(|e| DomainError::Config(format!("RAGPIPE_TOP_K={v:?}: {e}")))?;
        }
        if let Some(v) = lookup("RAGPIPE_EMPTY_RETRIEVAL") {
            config.empty_retrieval = v.parse().map_err(DomainError::Config)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let needs_token = self.embedding_provider.is_remote() || self.generation_provider.is_remote();
        if needs_token && self.credential_token.trim().is_empty() {
            return Err(DomainError::Config(format!(
                "RAGPIPE_API_TOKEN is required for embedding provider '{}' / generation provider '{}'",
                self.embedding_provider, self.generation_provider
            )));
        }
        for (name, model) in [
            ("embedding_model", &self.embedding_model),
            ("generation_model", &self.generation_model),
        ] {
            if matches!(model, Some(m) if m.trim().is_empty()) {
                return Err(DomainError::Config(format!("{name} must not be blank")));
            }
        }
        if self.db_path.trim().is_empty() {
            return Err(DomainError::Config("db_path must not be blank".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_offline() {
        let config = PipelineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.embedding_provider, EmbeddingBackend::Hashing);
        assert_eq!(config.generation_provider, GenerationBackend::Echo);
        assert_eq!(config.default_top_k, 2);
        assert_eq!(config.empty_retrieval, EmptyRetrievalPolicy::Proceed);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = PipelineConfig::from_lookup(lookup(&[("RAGPIPE_EMBEDDING_PROVIDER", "word2vec")]));
        assert!(matches!(err, Err(DomainError::Config(_))));
    }

    #[test]
    fn test_remote_provider_requires_token() {
        let err = PipelineConfig::from_lookup(lookup(&[("RAGPIPE_GENERATION_PROVIDER", "openai")]));
        assert!(matches!(err, Err(DomainError::Config(_))));

        let ok = PipelineConfig::from_lookup(lookup(&[
            ("RAGPIPE_GENERATION_PROVIDER", "openai"),
            ("RAGPIPE_API_TOKEN", "sk-test"),
        ]));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_blank_model_rejected() {
        let err = PipelineConfig::from_lookup(lookup(&[("RAGPIPE_EMBEDDING_MODEL", "  ")]));
        assert!(matches!(err, Err(DomainError::Config(_))));
    }

    #[test]
    fn test_bad_top_k_rejected() {
        let err = PipelineConfig::from_lookup(lookup(&[("RAGPIPE_TOP_K", "-3")]));
        assert!(matches!(err, Err(DomainError::Config(_))));
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let config = PipelineConfig {
            credential_token: "hf_secret".to_string(),
            ..PipelineConfig::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("hf_secret"));
        assert!(printed.contains("<redacted>"));
    }
}
