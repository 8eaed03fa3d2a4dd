//! CLI argument definitions for the docbind binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Document format of the input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// Pick by file extension, then by content
    Auto,
    Xml,
    Json,
}

/// Document format to encode into
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodeFormat {
    Xml,
    Json,
}

/// Hydrate typed invoices from XML and JSON documents
#[derive(Parser, Debug)]
#[command(name = "docbind")]
#[command(about = "docbind: typed object graphs from XML and JSON documents")]
#[command(version)]
pub struct Cli {
    /// Print machine-readable JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hydrate an invoice and print it
    Hydrate(HydrateArgs),
    /// Hydrate an invoice and encode it back into a document
    Encode(EncodeArgs),
    /// Hydrate an invoice and report whether it is valid
    Check(CheckArgs),
}

/// Input options shared by every command
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Document to read
    pub file: PathBuf,

    /// Document format
    #[arg(short, long, value_enum, default_value = "auto", env = "DOCBIND_FORMAT")]
    pub format: InputFormat,

    /// Hydrator configuration file (JSON)
    #[arg(short, long, env = "DOCBIND_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for the hydrate command
#[derive(clap::Args, Debug)]
pub struct HydrateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the encode command
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Name of the root element to write
    #[arg(short, long, default_value = "Invoice")]
    pub root: String,

    /// Format to write
    #[arg(short, long, value_enum, default_value = "xml")]
    pub to: EncodeFormat,
}

/// Arguments for the check command
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}
