//! Pairwise backend: legacy NCBI BLAST (`formatdb` + `blastall -p blastp`).
//!
//! Set A is formatted into a protein database once; every record of set B is
//! then searched on its own, in file order. A query whose run exceeds the
//! time limit is killed and counted as having no hits.
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::common::SeqMapError;
use crate::process::{run_tool, RunOutcome};
use crate::search::{parse_blast_report, QueryHits, SearchExecutor};
use crate::sequence::SequenceCollection;

/// [`SearchExecutor`] backed by `formatdb` and `blastall`.
#[derive(Clone, Debug)]
pub struct BlastpExecutor {
    pub formatdb: PathBuf,
    pub blastall: PathBuf,
    /// Per-query limit for `blastall` (also applied to `formatdb`).
    pub timeout: Option<Duration>,
}

impl Default for BlastpExecutor {
    fn default() -> Self {
        Self { formatdb: PathBuf::from("formatdb"), blastall: PathBuf::from("blastall"), timeout: None }
    }
}

impl BlastpExecutor {
    /// Locate the tools under an NCBI installation directory: `<dir>/bin`
    /// first, then `<dir>` itself. Falls back to bare names on `PATH`.
    pub fn from_ncbidir(ncbidir: Option<&Path>) -> Self {
        let mut exec = Self::default();
        if let Some(dir) = ncbidir {
            for candidate in [dir.join("bin"), dir.to_path_buf()] {
                if candidate.join("formatdb").is_file() {
                    exec.formatdb = candidate.join("formatdb");
                    exec.blastall = candidate.join("blastall");
                    break;
                }
            }
        }
        exec
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl SearchExecutor for BlastpExecutor {
    fn name(&self) -> &str {
        "blastp"
    }

    fn search(
        &self,
        database: &SequenceCollection,
        queries: &SequenceCollection,
    ) -> Result<Vec<QueryHits>, SeqMapError> {
        let scratch = tempfile::Builder::new()
            .prefix("seqmap-blastp-")
            .tempdir()
            .map_err(|e| SeqMapError::io("create scratch directory in", std::env::temp_dir(), e))?;
        let dir = scratch.path();

        let db = dir.join("fastaA");
        std::fs::write(&db, database.to_fasta()).map_err(|e| SeqMapError::io("write", &db, e))?;
        let log = dir.join("formatdb.log");
        let formatdb_args = [
            OsStr::new("-p"), OsStr::new("T"), OsStr::new("-o"), OsStr::new("T"),
            OsStr::new("-l"), log.as_os_str(), OsStr::new("-i"), db.as_os_str(),
        ];
        if let RunOutcome::TimedOut = run_tool(&self.formatdb, formatdb_args, dir, self.timeout)? {
            return Err(SeqMapError::SearchTimeout {
                tool: "formatdb".into(),
                limit: self.timeout.unwrap_or_default(),
            });
        }

        let query_path = dir.join("query.fasta");
        let mut out = Vec::new();
        for record in queries.records() {
            std::fs::write(&query_path, record.to_fasta()).map_err(|e| SeqMapError::io("write", &query_path, e))?;
            let args = [
                OsStr::new("-p"), OsStr::new("blastp"),
                OsStr::new("-d"), db.as_os_str(),
                OsStr::new("-i"), query_path.as_os_str(),
            ];
            let report = match run_tool(&self.blastall, args, dir, self.timeout)? {
                RunOutcome::Finished(o) => o.stdout,
                RunOutcome::TimedOut => {
                    tracing::warn!(query = %record.id, "blastall timed out; query left unmapped");
                    continue;
                }
            };
            let hits = parse_blast_report(&record.id, &report);
            if hits.is_empty() {
                tracing::debug!(query = %record.id, "no hits");
                continue;
            }
            tracing::info!(query = %record.id, hits = hits.len(), "mapped query");
            out.push(QueryHits { query_id: record.id.clone(), hits });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_path_lookup() {
        let exec = BlastpExecutor::from_ncbidir(None);
        assert_eq!(exec.formatdb, PathBuf::from("formatdb"));
        assert_eq!(exec.blastall, PathBuf::from("blastall"));
    }

    #[test]
    fn prefers_bin_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("bin")).unwrap();
        std::fs::write(dir.path().join("bin").join("formatdb"), "").unwrap();
        std::fs::write(dir.path().join("formatdb"), "").unwrap();
        let exec = BlastpExecutor::from_ncbidir(Some(dir.path()));
        assert_eq!(exec.formatdb, dir.path().join("bin").join("formatdb"));
        assert_eq!(exec.blastall, dir.path().join("bin").join("blastall"));
    }

    #[test]
    fn falls_back_to_directory_itself() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("formatdb"), "").unwrap();
        let exec = BlastpExecutor::from_ncbidir(Some(dir.path()));
        assert_eq!(exec.blastall, dir.path().join("blastall"));
    }

    #[test]
    fn unknown_directory_uses_path() {
        let dir = tempfile::tempdir().unwrap();
        let exec = BlastpExecutor::from_ncbidir(Some(dir.path())).with_timeout(Some(Duration::from_secs(3)));
        assert_eq!(exec.formatdb, PathBuf::from("formatdb"));
        assert_eq!(exec.timeout, Some(Duration::from_secs(3)));
    }
}
