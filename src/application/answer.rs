use crate::application::retriever::{embed_query, Retriever};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::generation_port::GenerationProvider;
use crate::domain::values::empty_retrieval::EmptyRetrievalPolicy;
use crate::domain::values::pipeline_stage::PipelineStage;
use crate::domain::values::prompt::{assemble_context, build_prompt};
use crate::domain::values::retrieval::RetrievedDocument;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};

/// Outcome of one answer run.
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub run_id: String,
    /// Generator output, verbatim.
    pub text: String,
    pub prompt: String,
    pub context: String,
    pub retrieved: Vec<RetrievedDocument>,
    pub generated_at: DateTime<Utc>,
}

/// Tracks the current stage of a run and only moves forward.
struct StageTracker {
    stage: PipelineStage,
}

impl StageTracker {
    fn new() -> Self {
        Self { stage: PipelineStage::Idle }
    }

    fn advance(&mut self) -> PipelineStage {
        if let Some(next) = self.stage.next() {
            debug!(from = %self.stage, to = %next, "stage");
            self.stage = next;
        }
        self.stage
    }
}

pub struct AnswerUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    retriever: Arc<Retriever>,
    generator: Arc<dyn GenerationProvider>,
    empty_policy: EmptyRetrievalPolicy,
}

impl AnswerUseCase {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        retriever: Arc<Retriever>,
        generator: Arc<dyn GenerationProvider>,
        empty_policy: EmptyRetrievalPolicy,
    ) -> Self {
        Self { embedder, retriever, generator, empty_policy }
    }

    pub async fn execute(&self, query: &str, k: Option<usize>) -> Result<Answer, DomainError> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let span = info_span!("answer", run_id = %run_id);
        self.run(run_id, query, k).instrument(span).await
    }

    async fn run(&self, run_id: String, query: &str, k: Option<usize>) -> Result<Answer, DomainError> {
        let mut tracker = StageTracker::new();

        tracker.advance();
        let query_vector = embed_query(self.embedder.as_ref(), query).await?;

        tracker.advance();
        let retrieved = self.retriever.retrieve(&query_vector, k)?;
        if retrieved.is_empty() && self.empty_policy == EmptyRetrievalPolicy::Fail {
            return Err(DomainError::RetrievalEmpty { query: query.to_string() });
        }

        tracker.advance();
        let context = assemble_context(retrieved.iter().map(RetrievedDocument::text));
        let prompt = build_prompt(&context, query);

        tracker.advance();
        let text = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                let message = match e {
                    DomainError::Generation { message, .. } => message,
                    other => other.to_string(),
                };
                return Err(DomainError::Generation { prompt, retrieved, message });
            }
        };

        tracker.advance();
        info!(hits = retrieved.len(), "answered");
        Ok(Answer {
            run_id,
            text,
            prompt,
            context,
            retrieved,
            generated_at: Utc::now(),
        })
    }
}
