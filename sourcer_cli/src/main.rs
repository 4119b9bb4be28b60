use clap::Parser;
use owo_colors::OwoColorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; -v opens up the library's debug stream.
    let default_filter = match cli.verbose {
        0 => "sourcer_cli=info",
        1 => "sourcer_cli=debug,sourcer_core=debug,sourcer=debug",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = match &cli.command {
        Commands::List => commands::list::run(&cli),
        Commands::Search {
            source,
            query,
            start,
            results,
            query_type,
            language,
            app_id,
        } => {
            commands::search::run(
                &cli,
                source,
                query,
                *start,
                *results,
                (*query_type).into(),
                language.as_deref(),
                app_id.as_deref(),
            )
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1);
    }
}
