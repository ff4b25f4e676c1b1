pub mod hashing;
pub mod huggingface;
pub mod openai;
pub mod voyage;
