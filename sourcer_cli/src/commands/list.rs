use sourcer_core::build_registry;

use crate::cli::{Cli, OutputFormat};
use crate::commands::Result;
use crate::output;

pub fn run(cli: &Cli) -> Result<()> {
    let sources = build_registry().list();

    match cli.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sources)?),
        OutputFormat::Pretty => output::print_sources(&sources),
    }

    Ok(())
}
