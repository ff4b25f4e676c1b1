use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata key under which a document's text is stored alongside its vector.
pub const TEXT_KEY: &str = "text";

/// A caller-supplied unit of text, identified by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Metadata as persisted in the store: the caller's entries plus the
    /// document text under [`TEXT_KEY`], which overrides any caller value.
    pub fn stored_metadata(&self) -> BTreeMap<String, String> {
        let mut metadata = self.metadata.clone();
        metadata.insert(TEXT_KEY.to_string(), self.text.clone());
        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_metadata_carries_text() {
        let doc = Document::new("d1", "hello").with_metadata("source", "wiki");
        let meta = doc.stored_metadata();
        assert_eq!(meta.get("text").map(String::as_str), Some("hello"));
        assert_eq!(meta.get("source").map(String::as_str), Some("wiki"));
    }

    #[test]
    fn test_document_text_overrides_metadata_text() {
        let doc = Document::new("d1", "real").with_metadata("text", "stale");
        assert_eq!(doc.stored_metadata()["text"], "real");
    }
}
