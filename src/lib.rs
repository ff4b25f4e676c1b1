pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::answer::{Answer, AnswerUseCase};
use crate::application::ingest::IngestUseCase;
use crate::application::retriever::{embed_query, Retriever};
use crate::application::stats::{StatsUseCase, StoreStats};
use crate::config::{EmbeddingBackend, GenerationBackend, PipelineConfig, IN_MEMORY_DB};
use crate::domain::entities::document::Document;
use crate::domain::entities::indexed_record::IndexedRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::generation_port::GenerationProvider;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::empty_retrieval::EmptyRetrievalPolicy;
use crate::domain::values::retrieval::RetrievalResult;
use crate::domain::values::top_k::DEFAULT_TOP_K;
use crate::infrastructure::embeddings::hashing::HashingProvider;
use crate::infrastructure::embeddings::huggingface::HuggingFaceProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::embeddings::voyage::VoyageProvider;
use crate::infrastructure::generation::echo::EchoGenerator;
use crate::infrastructure::generation::huggingface::HuggingFaceGenerator;
use crate::infrastructure::generation::openai::OpenAiGenerator;
use crate::infrastructure::memory::vector_store::InMemoryVectorStore;
use crate::infrastructure::sqlite::vector_store::SqliteVectorStore;
use std::sync::Arc;
use tracing::warn;

pub struct RagPipeline {
    ingest_uc: IngestUseCase,
    answer_uc: AnswerUseCase,
    stats_uc: StatsUseCase,
    embedder: Arc<dyn EmbeddingProvider>,
    retriever: Arc<Retriever>,
    vector_store: Arc<dyn VectorStore>,
}

impl RagPipeline {
    /// Builds the store and both ports from a validated config.
    pub fn new(config: &PipelineConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let token = config.credential_token.clone();

        let embedder: Arc<dyn EmbeddingProvider> = match config.embedding_provider {
            EmbeddingBackend::Hashing => Arc::new(HashingProvider::default()),
            EmbeddingBackend::OpenAi => Arc::new(OpenAiProvider::new(token.clone(), config.embedding_model.clone(), None)),
            EmbeddingBackend::Voyage => Arc::new(VoyageProvider::new(token.clone(), config.embedding_model.clone(), None)),
            EmbeddingBackend::HuggingFace => Arc::new(HuggingFaceProvider::new(token.clone(), config.embedding_model.clone(), None)),
        };

        let generator: Arc<dyn GenerationProvider> = match config.generation_provider {
            GenerationBackend::Echo => Arc::new(EchoGenerator),
            GenerationBackend::OpenAi => Arc::new(OpenAiGenerator::new(token.clone(), config.generation_model.clone(), None)),
            GenerationBackend::HuggingFace => Arc::new(HuggingFaceGenerator::new(token, config.generation_model.clone(), None)),
        };

        let vector_store: Arc<dyn VectorStore> = if config.db_path == IN_MEMORY_DB {
            Arc::new(InMemoryVectorStore::new())
        } else {
            Arc::new(SqliteVectorStore::open(&config.db_path)?)
        };

        Self::with_options(vector_store, embedder, generator, config.default_top_k, config.empty_retrieval)
    }

    /// Wires caller-owned components with the default k and empty-retrieval policy.
    pub fn with_providers(
        vector_store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationProvider>,
    ) -> Result<Self, DomainError> {
        Self::with_options(vector_store, embedder, generator, DEFAULT_TOP_K, EmptyRetrievalPolicy::default())
    }

    pub fn with_options(
        vector_store: Arc<dyn VectorStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationProvider>,
        default_top_k: usize,
        empty_retrieval: EmptyRetrievalPolicy,
    ) -> Result<Self, DomainError> {
        let stats_uc = StatsUseCase::new(embedder.clone(), vector_store.clone());
        let stats = stats_uc.stats()?;
        if stats.dimension_drift() {
            warn!(
                stored = ?stats.dimension,
                provider = stats.embedder_dimension,
                "stored vectors and embedding provider disagree on dimension; new upserts and queries will fail"
            );
        }

        let retriever = Arc::new(Retriever::new(vector_store.clone(), default_top_k));
        Ok(Self {
            ingest_uc: IngestUseCase::new(embedder.clone(), vector_store.clone()),
            answer_uc: AnswerUseCase::new(embedder.clone(), retriever.clone(), generator, empty_retrieval),
            stats_uc,
            embedder,
            retriever,
            vector_store,
        })
    }

    pub async fn ingest(&self, documents: &[Document]) -> Result<usize, DomainError> {
        self.ingest_uc.execute(documents).await
    }

    pub async fn answer(&self, query: &str, k: Option<usize>) -> Result<Answer, DomainError> {
        self.answer_uc.execute(query, k).await
    }

    /// Embeds `query` and returns the ranked documents without generating.
    pub async fn retrieve(&self, query: &str, k: Option<usize>) -> Result<RetrievalResult, DomainError> {
        let vector = embed_query(self.embedder.as_ref(), query).await?;
        self.retriever.retrieve(&vector, k)
    }

    pub fn get(&self, id: &str) -> Result<IndexedRecord, DomainError> {
        self.vector_store.get(id)
    }

    pub fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.vector_store.delete(id)
    }

    pub fn stats(&self) -> Result<StoreStats, DomainError> {
        self.stats_uc.stats()
    }

    pub fn vector_store(&self) -> &Arc<dyn VectorStore> {
        &self.vector_store
    }

    /// Flushes the store and releases the port adapters.
    pub fn close(self) -> Result<(), DomainError> {
        self.vector_store.flush()
    }
}
