pub mod empty_retrieval;
pub mod pipeline_stage;
pub mod prompt;
pub mod retrieval;
pub mod similarity;
pub mod top_k;
