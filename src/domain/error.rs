use crate::domain::values::retrieval::RetrievedDocument;
use thiserror::Error;

/// Placeholder id used in dimension errors raised for query vectors.
pub const QUERY_ID: &str = "<query>";

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Dimension mismatch for {id}: store expects {expected}, got {actual}")]
    DimensionMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Embedding error for {text:?}: {message}")]
    Embedding { text: String, message: String },

    /// Generation failed after retrieval succeeded; `retrieved` holds what
    /// would have been used as context.
    #[error("Generation error: {message}")]
    Generation {
        prompt: String,
        retrieved: Vec<RetrievedDocument>,
        message: String,
    },

    #[error("No documents retrieved for query {query:?}")]
    RetrievalEmpty { query: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    pub fn embedding(text: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Embedding {
            text: text.into(),
            message: message.into(),
        }
    }

    /// A generation failure without pipeline context, as raised by adapters.
    pub fn generation(message: impl Into<String>) -> Self {
        DomainError::Generation {
            prompt: String::new(),
            retrieved: Vec::new(),
            message: message.into(),
        }
    }

    pub(crate) fn database(e: impl std::fmt::Display) -> Self {
        DomainError::Database(e.to_string())
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Database(e.to_string())
    }
}
