//! Batch backend: HMMER `phmmer` with a per-target table (`--tblout`).
//!
//! One run searches every query of set B against set A. Hits come back in
//! the order phmmer writes them, grouped by query.
use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::Duration;

use crate::common::SeqMapError;
use crate::process::{run_tool, tool_name, RunOutcome};
use crate::search::{group_by_query, parse_tblout, QueryHits, SearchExecutor};
use crate::sequence::SequenceCollection;

/// [`SearchExecutor`] backed by a single `phmmer` run.
#[derive(Clone, Debug)]
pub struct PhmmerExecutor {
    pub phmmer: PathBuf,
    /// Limit for the whole batch run. Exceeding it is fatal.
    pub timeout: Option<Duration>,
}

impl Default for PhmmerExecutor {
    fn default() -> Self {
        Self { phmmer: PathBuf::from("phmmer"), timeout: None }
    }
}

impl PhmmerExecutor {
    pub fn new(phmmer: impl Into<PathBuf>) -> Self {
        Self { phmmer: phmmer.into(), timeout: None }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl SearchExecutor for PhmmerExecutor {
    fn name(&self) -> &str {
        "phmmer"
    }

    fn search(
        &self,
        database: &SequenceCollection,
        queries: &SequenceCollection,
    ) -> Result<Vec<QueryHits>, SeqMapError> {
        let scratch = tempfile::Builder::new()
            .prefix("seqmap-phmmer-")
            .tempdir()
            .map_err(|e| SeqMapError::io("create scratch directory in", std::env::temp_dir(), e))?;
        let dir = scratch.path();

        let db = dir.join("database.fasta");
        let qry = dir.join("queries.fasta");
        let tblout = dir.join("tblout");
        std::fs::write(&db, database.to_fasta()).map_err(|e| SeqMapError::io("write", &db, e))?;
        std::fs::write(&qry, queries.to_fasta()).map_err(|e| SeqMapError::io("write", &qry, e))?;

        let args = [
            OsStr::new("--noali"),
            OsStr::new("--tblout"), tblout.as_os_str(),
            qry.as_os_str(),
            db.as_os_str(),
        ];
        if let RunOutcome::TimedOut = run_tool(&self.phmmer, args, dir, self.timeout)? {
            return Err(SeqMapError::SearchTimeout {
                tool: tool_name(&self.phmmer),
                limit: self.timeout.unwrap_or_default(),
            });
        }

        let text = std::fs::read_to_string(&tblout).map_err(|e| {
            SeqMapError::search(&tool_name(&self.phmmer), format!("unreadable tblout {}: {}", tblout.display(), e))
        })?;
        let groups = group_by_query(parse_tblout(&text)?);
        for g in &groups {
            tracing::info!(query = %g.query_id, hits = g.hits.len(), "mapped query");
        }
        Ok(groups)
    }
}
