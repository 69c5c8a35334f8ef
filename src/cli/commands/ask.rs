//! `docqa ask` — answer a question from the indexed corpus.

use anyhow::{Context, Result};
use clap::Args;

use crate::domain::models::Config;

/// Arguments for the ask command.
#[derive(Debug, Args)]
pub struct AskArgs {
    /// The question to answer
    pub query: String,

    /// Number of chunks to retrieve (default: from configuration)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

pub async fn execute(args: AskArgs, config: &Config, json: bool) -> Result<()> {
    let pipeline = super::build_pipeline(config)?;

    let k = args.top_k.unwrap_or(config.retrieval.top_k);
    anyhow::ensure!(k > 0, "top_k must be at least 1");

    let answer = pipeline
        .answer(&args.query, k)
        .await
        .context("Query failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        println!("{}", console::style("Summary").bold());
        println!("{}\n", answer.summary);

        println!("{}", console::style("Relevant articles").bold());
        if answer.sources.is_empty() {
            println!("(none)");
        } else {
            for source in &answer.sources {
                println!("- {}: {}", source.title, source.url);
            }
        }
    }

    Ok(())
}
