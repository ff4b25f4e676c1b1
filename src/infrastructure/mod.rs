pub mod embeddings;
pub mod generation;
pub mod memory;
pub mod sqlite;
