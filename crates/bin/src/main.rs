use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod document;
mod output;

use cli::{Cli, Commands};
use output::OutputFormat;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout only carries documents
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("docbind=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_json_flag(cli.json);

    match &cli.command {
        Commands::Hydrate(args) => commands::hydrate::run(args, format),
        Commands::Encode(args) => commands::encode::run(args),
        Commands::Check(args) => commands::check::run(args, format),
    }
}
