pub mod answer;
pub mod ingest;
pub mod retriever;
pub mod stats;
