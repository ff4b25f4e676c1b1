use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The unit a vector store holds for each id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedRecord {
    pub id: String,
    pub vector: Vec<f32>,
    pub metadata: BTreeMap<String, String>,
}
