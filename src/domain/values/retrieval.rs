use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One ranked hit returned by a vector store query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedDocument {
    pub id: String,
    pub metadata: BTreeMap<String, String>,
    /// Cosine similarity in `[-1.0, 1.0]`, higher is closer.
    pub score: f64,
}

impl RetrievedDocument {
    /// The document text carried in metadata, empty if the record has none.
    pub fn text(&self) -> &str {
        self.metadata
            .get(crate::domain::entities::document::TEXT_KEY)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Results ordered by descending score, ties by ascending insertion order.
pub type RetrievalResult = Vec<RetrievedDocument>;
