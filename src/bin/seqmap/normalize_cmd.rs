//! CLI subcommand implementation. Use via `seqmap normalize`.
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use seqmap::*;

/// Options for the `normalize` subcommand.
#[derive(Debug, Args)]
pub struct NormalizeCmd {
    /// Input FASTA file.
    #[arg(value_name="IN.fasta")]
    pub input: PathBuf,
    /// Output FASTA file (default: stdout).
    #[arg(value_name="OUT")]
    pub out: Option<PathBuf>,
}

pub fn run(cmd: NormalizeCmd) -> Result<()> {
    let set = read_sequences(&cmd.input).with_context(|| format!("parse FASTA: {}", cmd.input.display()))?;
    let text = set.to_fasta();
    match &cmd.out {
        Some(path) => std::fs::write(path, text).with_context(|| format!("create {}", path.display()))?,
        None => print!("{}", text),
    }
    Ok(())
}
