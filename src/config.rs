//! Run configuration: which search backend to use and how hits are mapped.
use std::path::PathBuf;
use std::time::Duration;

use crate::blastp::BlastpExecutor;
use crate::common::SeqMapError;
use crate::phmmer::PhmmerExecutor;
use crate::search::SearchExecutor;

/// Search backend selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    /// `formatdb` + `blastall`, optionally from an NCBI install directory.
    Blastp { ncbidir: Option<PathBuf> },
    /// `phmmer` at the given path.
    Phmmer { path: PathBuf },
}

impl Default for Backend {
    fn default() -> Self {
        Backend::Blastp { ncbidir: None }
    }
}

impl Backend {
    /// Pick a backend from the two mutually exclusive options. Neither set
    /// means blastp from `PATH`.
    ///
    /// ## Errors
    /// [`SeqMapError::ConflictingBackends`] when both are set.
    pub fn select(ncbidir: Option<PathBuf>, phmmer_path: Option<PathBuf>) -> Result<Self, SeqMapError> {
        match (ncbidir, phmmer_path) {
            (Some(_), Some(_)) => Err(SeqMapError::ConflictingBackends),
            (None, Some(path)) => Ok(Backend::Phmmer { path }),
            (ncbidir, None) => Ok(Backend::Blastp { ncbidir }),
        }
    }
}

/// Validated settings for one mapping run.
#[derive(Clone, Debug)]
pub struct MapConfig {
    pub backend: Backend,
    /// Keep only the strongest hit per query (default `true`).
    pub mapfirst: bool,
    /// Per-invocation limit for the external tool.
    pub timeout: Option<Duration>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self { backend: Backend::default(), mapfirst: true, timeout: None }
    }
}

impl MapConfig {
    /// Build the executor for the configured backend.
    pub fn executor(&self) -> Box<dyn SearchExecutor> {
        match &self.backend {
            Backend::Blastp { ncbidir } => {
                Box::new(BlastpExecutor::from_ncbidir(ncbidir.as_deref()).with_timeout(self.timeout))
            }
            Backend::Phmmer { path } => Box::new(PhmmerExecutor::new(path.clone()).with_timeout(self.timeout)),
        }
    }
}
