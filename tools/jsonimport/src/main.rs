mod commands;
mod format;
mod writer;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check::CheckArgs, convert::ConvertArgs, schema::SchemaArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsonimport",
    about = "Validate and convert JSON row files against a collection schema"
)]
struct Cli {
    /// Log progress at info level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert rows to jsonl/parquet
    Convert(ConvertArgs),
    /// Decode rows without writing them and report the first error
    Check(CheckArgs),
    /// Print a collection schema and its Arrow schema
    Schema(SchemaArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Convert(args) => args.run(),
        Commands::Check(args) => args.run(),
        Commands::Schema(args) => args.run(),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
