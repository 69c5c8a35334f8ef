//! Command-line interface for docqa.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::models::LoggingConfig;

/// Help-center question answering over an embedded article index.
#[derive(Debug, Parser)]
#[command(name = "docqa", version, about)]
pub struct Cli {
    /// Path to a configuration file (default: docqa.yaml + DOCQA_* env)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rebuild all artifacts: fetch documents, chunk, embed, and index
    Refresh(commands::refresh::RefreshArgs),

    /// Ask a question against the indexed corpus
    Ask(commands::ask::AskArgs),
}

/// Print a failure and exit non-zero.
pub fn handle_error(err: &anyhow::Error, json: bool) -> ! {
    if json {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{payload}");
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}

/// Initialize tracing from the logging configuration. A `RUST_LOG`
/// directive overrides the configured level.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = log_filter(&logging.level, std::env::var("RUST_LOG").ok());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn log_filter(level: &str, env_directives: Option<String>) -> EnvFilter {
    match env_directives {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(level),
    }
}
