//! Docqa CLI entry point.

use clap::Parser;

use docqa::cli::{commands, handle_error, init_tracing, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match commands::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(&err, cli.json),
    };

    init_tracing(&config.logging);

    let result = match cli.command {
        Commands::Refresh(args) => commands::refresh::execute(args, &config, cli.json).await,
        Commands::Ask(args) => commands::ask::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(&err, cli.json);
    }
}
