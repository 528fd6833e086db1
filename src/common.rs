//! Error type shared by the parser, the search backends and the pipeline.
//!
//! Every fallible library call returns [`SeqMapError`]. The CLI layer wraps
//! these into `anyhow::Error` with file-level context.
//!
//! ## Examples
//! ```rust,no_run
//! use seqmap::{parse_sequences, SeqMapError};
//! let err = parse_sequences("ACGT\n").unwrap_err();
//! assert!(matches!(err, SeqMapError::MalformedInput { .. }));
//! ```
//!
use std::path::PathBuf;
use std::time::Duration;

/// Errors that can be returned by the mapping pipeline.
#[derive(thiserror::Error, Debug)]
pub enum SeqMapError {
    /// Returned when a FASTA input holds no recognizable record.
    #[error("malformed sequence input ({source_name}): {reason}")]
    MalformedInput { source_name: String, reason: &'static str },
    /// Returned when the external search tool fails to launch, exits non-zero
    /// or produces output that cannot be read.
    #[error("{tool} failed: {detail}")]
    SearchExecution { tool: String, detail: String },
    /// Returned when a batch search exceeds its time limit.
    #[error("{tool} did not finish within {limit:?}")]
    SearchTimeout { tool: String, limit: Duration },
    /// Returned when both the blastp and the phmmer backend are requested.
    #[error("cannot set both an NCBI directory (blastp) and a phmmer path")]
    ConflictingBackends,
    /// File system access around the pipeline (inputs, scratch files).
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl SeqMapError {
    /// Build an [`SeqMapError::Io`] naming the path that was being accessed.
    pub fn io(action: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SeqMapError::Io { context: format!("{} {}", action, path.into().display()), source }
    }

    pub(crate) fn search(tool: &str, detail: impl Into<String>) -> Self {
        SeqMapError::SearchExecution { tool: tool.to_string(), detail: detail.into() }
    }
}
