//! Shared test helpers: scripted ports and store fixtures.
#![allow(dead_code)]

use ragpipe::domain::entities::document::Document;
use ragpipe::domain::error::DomainError;
use ragpipe::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use ragpipe::domain::ports::generation_port::GenerationProvider;
use ragpipe::domain::ports::vector_store::VectorStore;
use ragpipe::infrastructure::memory::vector_store::InMemoryVectorStore;
use ragpipe::infrastructure::sqlite::vector_store::SqliteVectorStore;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Embedder with a fixed text → vector table. Unknown texts and the text in
/// `fail_on` produce an embedding error.
pub struct ScriptedEmbedder {
    table: HashMap<String, Vec<f32>>,
    fail_on: Option<String>,
    pub calls: AtomicUsize,
}

impl ScriptedEmbedder {
    pub fn new(pairs: &[(&str, Vec<f32>)]) -> Self {
        Self {
            table: pairs.iter().map(|(t, v)| (t.to_string(), v.clone())).collect(),
            fail_on: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(mut self, text: &str) -> Self {
        self.fail_on = Some(text.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for ScriptedEmbedder {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        texts
            .iter()
            .map(|t| {
                if self.fail_on.as_deref() == Some(t.as_str()) {
                    return Err(DomainError::embedding(t.as_str(), "model unavailable"));
                }
                self.table
                    .get(t)
                    .cloned()
                    .ok_or_else(|| DomainError::embedding(t.as_str(), "no scripted vector"))
            })
            .collect()
    }

    fn dimension(&self) -> usize {
        self.table.values().next().map(Vec::len).unwrap_or(0)
    }
}

/// Generator that records prompts and either answers with a fixed reply or fails.
pub struct RecordingGenerator {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub fn replying(reply: &str) -> Self {
        Self { reply: Some(reply.to_string()), prompts: Mutex::new(Vec::new()) }
    }

    pub fn failing() -> Self {
        Self { reply: None, prompts: Mutex::new(Vec::new()) }
    }

    pub fn recorded(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl GenerationProvider for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| DomainError::generation("backend out of memory"))
    }
}

pub fn memory_store() -> Arc<dyn VectorStore> {
    Arc::new(InMemoryVectorStore::new())
}

pub fn sqlite_store() -> Arc<dyn VectorStore> {
    Arc::new(SqliteVectorStore::open(":memory:").unwrap())
}

/// One fixture per backend, labelled for assertion messages.
pub fn backends() -> Vec<(&'static str, Arc<dyn VectorStore>)> {
    vec![("memory", memory_store()), ("sqlite", sqlite_store())]
}

pub fn meta(text: &str) -> BTreeMap<String, String> {
    let mut m = BTreeMap::new();
    m.insert("text".to_string(), text.to_string());
    m
}

pub fn upsert_one(store: &Arc<dyn VectorStore>, id: &str, vector: Vec<f32>, text: &str) {
    store.upsert(&[id.to_string()], &[vector], &[meta(text)]).unwrap();
}

pub fn ids(results: &[ragpipe::domain::values::retrieval::RetrievedDocument]) -> Vec<String> {
    results.iter().map(|r| r.id.clone()).collect()
}

pub fn doc(id: &str, text: &str) -> Document {
    Document::new(id, text)
}
