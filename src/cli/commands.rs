use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ragpipe", about = "Retrieval-augmented generation over a local vector store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Embed and store documents
    Ingest {
        /// JSON array of {"id", "text", "metadata"?} objects
        json: String,
    },
    /// Retrieve context and generate an answer
    Ask {
        query: String,
        /// Number of documents to retrieve (defaults to RAGPIPE_TOP_K)
        #[arg(long)]
        k: Option<usize>,
    },
    /// Show the ranked documents for a query without generating
    Retrieve {
        query: String,
        #[arg(long)]
        k: Option<usize>,
    },
    /// Print a stored record
    Get {
        id: String,
    },
    /// Delete a record (no-op if absent)
    Delete {
        id: String,
    },
    /// Show store statistics
    Stats,
}
