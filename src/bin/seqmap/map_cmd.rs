//! CLI subcommand implementation. Use via `seqmap map`.
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};
use clap::{ArgAction, Args};
use seqmap::*;

/// Options for the `map` subcommand.
#[derive(Debug, Args)]
pub struct MapCmd {
    /// FASTA file of set A (the database; one report line per mapped entry).
    #[arg(value_name="A.fasta")]
    pub fasta_a: PathBuf,
    /// FASTA file of set B (the queries).
    #[arg(value_name="B.fasta")]
    pub fasta_b: PathBuf,
    /// Output file for the mapping report (default: stdout).
    #[arg(value_name="OUT")]
    pub out: Option<PathBuf>,
    /// NCBI BLAST directory; formatdb and blastall are looked up under DIR/bin, then DIR.
    #[arg(long, value_name="DIR")]
    pub ncbidir: Option<PathBuf>,
    /// Use phmmer at this path instead of blastall.
    #[arg(long, value_name="PATH")]
    pub phmmer_path: Option<PathBuf>,
    /// true: map only the first hit of each query; false: map all hits.
    #[arg(long, default_value_t=true, action=ArgAction::Set, value_name="BOOL")]
    pub mapfirst: bool,
    /// Time limit in seconds for each search tool invocation.
    #[arg(long, value_name="SECS")]
    pub timeout: Option<u64>,
    /// Also write a tab-separated summary (target_id, count, query_ids).
    #[arg(long, value_name="FILE")]
    pub summary: Option<PathBuf>,
}

impl MapCmd {
    /// Validate options into a [`MapConfig`].
    pub fn config(&self) -> Result<MapConfig> {
        let backend = Backend::select(self.ncbidir.clone(), self.phmmer_path.clone())?;
        Ok(MapConfig { backend, mapfirst: self.mapfirst, timeout: self.timeout.map(Duration::from_secs) })
    }
}

pub fn run(cmd: MapCmd) -> Result<()> {
    let config = cmd.config()?;
    let report = map_files(&cmd.fasta_a, &cmd.fasta_b, &config)
        .with_context(|| format!("map {} onto {}", cmd.fasta_b.display(), cmd.fasta_a.display()))?;
    let text = report.to_text();

    match &cmd.out {
        Some(path) => std::fs::write(path, &text).with_context(|| format!("create {}", path.display()))?,
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(text.as_bytes())?;
            lock.flush()?;
        }
    }

    if let Some(path) = &cmd.summary {
        let f = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
        write_summary_tsv(&report.mapping, &report.a_ids, f).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}
