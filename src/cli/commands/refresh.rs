//! `docqa refresh` — rebuild all artifacts from the document corpus.

use anyhow::{Context, Result};
use clap::Args;

use crate::domain::models::Config;

/// Arguments for the refresh command.
#[derive(Debug, Args)]
pub struct RefreshArgs {}

pub async fn execute(_args: RefreshArgs, config: &Config, json: bool) -> Result<()> {
    let pipeline = super::build_pipeline(config)?;

    pipeline.refresh().await.context("Refresh failed")?;

    if json {
        println!("{}", serde_json::json!({ "status": "refreshed" }));
    } else {
        println!(
            "{} Index rebuilt at {}",
            console::style("✓").green().bold(),
            config.artifacts.dir
        );
    }

    Ok(())
}
