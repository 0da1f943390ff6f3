use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde_json::json;

use oaq_core::rank::{Choice, find_candidates};
use oaq_core::resolve::{curl_command, operation_sample, operation_schemas, operation_summary};
use oaq_core::spec::{self, ApiDocument, HttpMethod};
use oaq_llm::Chooser;

#[derive(Parser)]
#[command(
    name = "oaq",
    about = "Match natural-language questions to OpenAPI operations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank candidate operations for a question
    Candidates {
        /// Path to the OpenAPI document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// The question to match
        question: String,

        /// Maximum number of candidates to return
        #[arg(long, default_value_t = 10)]
        top_k: usize,
    },

    /// Rank, disambiguate via the chat backend, and print the artifacts
    Ask {
        /// Path to the OpenAPI document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// The question to match
        question: String,

        /// Maximum number of candidates offered to the backend
        #[arg(long, default_value_t = 10)]
        top_k: usize,
    },

    /// Print one artifact for a specific (route, method) operation
    Resolve {
        /// Path to the OpenAPI document (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// The route exactly as it appears in the document
        route: String,

        /// The HTTP method
        method: String,

        /// Which artifact to print
        #[arg(long, default_value = "summary")]
        artifact: Artifact,
    },

    /// Load a document and report what was indexed
    Validate {
        /// Path to the OpenAPI document (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Artifact {
    Summary,
    Schemas,
    Sample,
    Curl,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Candidates {
            input,
            question,
            top_k,
        } => cmd_candidates(&input, &question, top_k),

        Commands::Ask {
            input,
            question,
            top_k,
        } => cmd_ask(&input, &question, top_k).await,

        Commands::Resolve {
            input,
            route,
            method,
            artifact,
        } => cmd_resolve(&input, &route, &method, artifact),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "oaq", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn load(path: &Path) -> Result<ApiDocument> {
    spec::load_document(path).with_context(|| format!("failed to load {}", path.display()))
}

fn cmd_candidates(input: &Path, question: &str, top_k: usize) -> Result<()> {
    let doc = load(input)?;
    let candidates = find_candidates(&doc, question, top_k);
    println!("{}", serde_json::to_string_pretty(&candidates)?);
    Ok(())
}

async fn cmd_ask(input: &Path, question: &str, top_k: usize) -> Result<()> {
    let doc = load(input)?;
    let candidates = find_candidates(&doc, question, top_k);

    let chooser = Chooser::from_env().context("failed to build chat backend client")?;
    match chooser.choose(question, &candidates).await {
        Choice::NoMatch => {
            println!("{}", json!({"error": "No matching endpoint found"}));
        }
        Choice::Operation { route, method } => {
            let operation = operation_summary(&doc, &route, method)?;
            let sample = operation_sample(&doc, &route, method).ok();
            let curl = curl_command(&doc, &route, method)?;
            let out = json!({
                "operation": operation,
                "sample": sample,
                "curl": curl,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

fn cmd_resolve(input: &Path, route: &str, method: &str, artifact: Artifact) -> Result<()> {
    let doc = load(input)?;
    let method =
        HttpMethod::parse(method).with_context(|| format!("unknown HTTP method: {method}"))?;

    match artifact {
        Artifact::Summary => {
            let summary = operation_summary(&doc, route, method)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Artifact::Schemas => {
            let bundle = operation_schemas(&doc, route, method)?;
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
        Artifact::Sample => {
            let payload = operation_sample(&doc, route, method)?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Artifact::Curl => {
            let command = curl_command(&doc, route, method)?;
            println!("{command}");
        }
    }
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<()> {
    let doc = load(input)?;
    let title = doc
        .info
        .as_ref()
        .and_then(|info| info.title.as_deref())
        .unwrap_or("<untitled>");
    println!(
        "{}: {} paths, {} operations, {} schemas",
        title,
        doc.paths.len(),
        doc.operation_count(),
        doc.schema_count()
    );
    Ok(())
}
