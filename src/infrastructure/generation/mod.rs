pub mod echo;
pub mod huggingface;
pub mod openai;
