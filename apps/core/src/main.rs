use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use studymap_core::models::{BatchRequest, MindmapRequest, StudentRecord};
use studymap_core::{load_json, AdvisorConfig, AdvisorService};

/// Syllabus mindmaps and study recommendations from JSON requests
#[derive(Parser, Debug)]
#[command(name = "studymap", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a mindmap from a syllabus request
    Mindmap {
        /// Request file, or `-` for stdin
        input: String,
    },
    /// Generate study suggestions for a student record
    Suggestions {
        /// Request file, or `-` for stdin
        input: String,
    },
    /// Process many mindmap and suggestion requests concurrently
    Batch {
        /// Request file, or `-` for stdin
        input: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("STUDYMAP_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // Logs go to stderr so stdout stays pure JSON
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AdvisorConfig::from_env().context("Failed to load configuration")?;
    init_tracing();
    info!("Starting studymap v{}", env!("CARGO_PKG_VERSION"));

    let service = AdvisorService::new(config);

    match args.command {
        Command::Mindmap { input } => {
            let request: MindmapRequest =
                load_json(&input).with_context(|| format!("Failed to read {}", input))?;
            print_json(&service.mindmap(&request)?)?;
        }
        Command::Suggestions { input } => {
            let record: StudentRecord =
                load_json(&input).with_context(|| format!("Failed to read {}", input))?;
            print_json(&service.suggestions(&record)?)?;
        }
        Command::Batch { input } => {
            let batch: BatchRequest =
                load_json(&input).with_context(|| format!("Failed to read {}", input))?;
            print_json(&service.process_batch(batch).await?)?;
        }
    }

    Ok(())
}
