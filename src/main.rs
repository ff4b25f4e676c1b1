use clap::Parser;
use ragpipe::cli::commands::{Cli, Commands};
use ragpipe::config::PipelineConfig;
use ragpipe::domain::entities::document::Document;
use ragpipe::domain::error::DomainError;
use ragpipe::RagPipeline;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let pipeline = match PipelineConfig::from_env().and_then(|config| RagPipeline::new(&config)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error initializing ragpipe: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(&pipeline, cli.command).await;
    let closed = pipeline.close();
    if let Err(e) = result {
        report(e.as_ref());
        std::process::exit(1);
    }
    if let Err(e) = closed {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(pipeline: &RagPipeline, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Ingest { json } => {
            let documents: Vec<Document> = serde_json::from_str(&json)?;
            let count = pipeline.ingest(&documents).await?;
            println!("Ingested {count} documents");
        }
        Commands::Ask { query, k } => {
            let answer = pipeline.answer(&query, k).await?;
            println!("{}", serde_json::to_string_pretty(&answer)?);
        }
        Commands::Retrieve { query, k } => {
            let results = pipeline.retrieve(&query, k).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Get { id } => {
            let record = pipeline.get(&id)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Delete { id } => {
            pipeline.delete(&id)?;
            println!("Deleted {id}");
        }
        Commands::Stats => {
            let stats = pipeline.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

/// Prints the error and, for generation failures, what was retrieved.
fn report(e: &(dyn std::error::Error + 'static)) {
    eprintln!("Error: {e}");
    if let Some(DomainError::Generation { retrieved, .. }) = e.downcast_ref::<DomainError>() {
        if let Ok(json) = serde_json::to_string_pretty(retrieved) {
            eprintln!("Retrieved context:\n{json}");
        }
    }
}
