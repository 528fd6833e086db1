//! Command-line interface for the `seqmap` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/seqmap/`:
//! - `map_cmd.rs`
//! - `normalize_cmd.rs`
//!
use clap::{Parser, Subcommand};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name="seqmap", version=env!("CARGO_PKG_VERSION"), about="Map one FASTA library onto another via blastp or phmmer hits", disable_help_subcommand=true)]
struct Cli {
    /// Log progress (per-query hits, tool command lines) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Map entries of B onto entries of A and report, per A entry, the B entries that hit it.
    Map(map_cmd::MapCmd),
    /// Rewrite a FASTA file with identifier-only headers, as fed to the search tools.
    Normalize(normalize_cmd::NormalizeCmd),
}

#[path = "seqmap/map_cmd.rs"] mod map_cmd;
#[path = "seqmap/normalize_cmd.rs"] mod normalize_cmd;

fn init_logging(verbose: bool) {
    let default = if verbose { "seqmap=debug" } else { "seqmap=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Command::Map(cmd) => map_cmd::run(cmd),
        Command::Normalize(cmd) => normalize_cmd::run(cmd),
    }
}
