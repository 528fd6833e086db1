//! End-to-end mapping: sequence sets -> search -> aggregate -> report.
use std::path::Path;

use crate::aggregate::{aggregate, MappingResult};
use crate::common::SeqMapError;
use crate::config::MapConfig;
use crate::report::format_report;
use crate::search::SearchExecutor;
use crate::sequence::{read_sequences, SequenceCollection};

/// Outcome of a mapping run: the mapping plus set A's id order.
#[derive(Clone, Debug)]
pub struct MappingReport {
    pub mapping: MappingResult,
    pub a_ids: Vec<String>,
}

impl MappingReport {
    /// Fixed-width text report.
    pub fn to_text(&self) -> String {
        format_report(&self.mapping, &self.a_ids)
    }
}

/// Search `b` against `a` with `executor` and aggregate the hits.
///
/// ## Errors
/// Any executor failure aborts the run; no partial report is produced.
pub fn run_mapping(
    a: &SequenceCollection,
    b: &SequenceCollection,
    executor: &dyn SearchExecutor,
    mapfirst: bool,
) -> Result<MappingReport, SeqMapError> {
    let a_ids: Vec<String> = a.ids().into_iter().map(str::to_string).collect();
    tracing::info!(tool = executor.name(), database = a.len(), queries = b.len(), mapfirst, "starting search");
    let hits = executor.search(a, b)?;
    let mapping = aggregate(hits, &a_ids, mapfirst);
    tracing::info!(mapped_entries = mapping.len(), assignments = mapping.total_assignments(), "mapping done");
    Ok(MappingReport { mapping, a_ids })
}

/// Convenience wrapper returning the text report.
pub fn map_collections(
    a: &SequenceCollection,
    b: &SequenceCollection,
    executor: &dyn SearchExecutor,
    mapfirst: bool,
) -> Result<String, SeqMapError> {
    Ok(run_mapping(a, b, executor, mapfirst)?.to_text())
}

/// Read both FASTA files and run the configured backend.
pub fn map_files(a_path: &Path, b_path: &Path, config: &MapConfig) -> Result<MappingReport, SeqMapError> {
    let a = read_sequences(a_path)?;
    let b = read_sequences(b_path)?;
    let executor = config.executor();
    run_mapping(&a, &b, executor.as_ref(), config.mapfirst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::QueryHits;
    use crate::sequence::parse_sequences;

    struct Canned(Vec<QueryHits>);

    impl SearchExecutor for Canned {
        fn name(&self) -> &str {
            "canned"
        }
        fn search(&self, _: &SequenceCollection, _: &SequenceCollection) -> Result<Vec<QueryHits>, SeqMapError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl SearchExecutor for Failing {
        fn name(&self) -> &str {
            "failing"
        }
        fn search(&self, _: &SequenceCollection, _: &SequenceCollection) -> Result<Vec<QueryHits>, SeqMapError> {
            Err(SeqMapError::SearchExecution { tool: "failing".into(), detail: "exit status 1".into() })
        }
    }

    #[test]
    fn report_uses_set_a_order() {
        let a = parse_sequences(">a1\nMK\n>a2\nMV\n").unwrap();
        let b = parse_sequences(">b1\nMK\n>b2\nMK\n>b3\nWW\n").unwrap();
        let exec = Canned(vec![
            QueryHits::from_targets("b1", &["a1", "a2"]),
            QueryHits::from_targets("b2", &["a1"]),
        ]);
        let text = map_collections(&a, &b, &exec, false).unwrap();
        assert_eq!(text, "             a1    2 b1 b2\n             a2    1 b1\n");
    }

    #[test]
    fn executor_failure_aborts() {
        let a = parse_sequences(">a1\nMK\n").unwrap();
        let err = map_collections(&a, &a, &Failing, true).unwrap_err();
        assert!(matches!(err, SeqMapError::SearchExecution { .. }));
    }

    #[test]
    fn missing_input_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.fasta");
        let err = map_files(&missing, &missing, &MapConfig::default()).unwrap_err();
        assert!(matches!(err, SeqMapError::Io { .. }));
    }
}
