//! FASTA sequence sets.
//!
//! The parser splits text on `>` record markers and keeps the records in file
//! order. A record's identifier is the first whitespace-delimited token of its
//! header; the rest of the header is discarded. Body lines are reduced to
//! their first token too, which is what the search backends are fed.
//!
//! ### Examples
//! ```rust,no_run
//! use seqmap::parse_sequences;
//! let set = parse_sequences(">a1 first entry\nMKV\n>a2\nMKL\n").unwrap();
//! assert_eq!(set.ids(), vec!["a1", "a2"]);
//! assert_eq!(set.to_fasta(), ">a1\nMKV\n>a2\nMKL\n");
//! ```
//!
use std::collections::HashMap;
use std::path::Path;

use crate::common::SeqMapError;

/// One FASTA record: identifier plus the normalised body lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceRecord {
    /// First token of the header line (text after '>').
    pub id: String,
    /// Body lines joined with '\n', each reduced to its first token.
    pub sequence: String,
}

impl SequenceRecord {
    /// Render the record as single-record FASTA with an identifier-only header.
    pub fn to_fasta(&self) -> String {
        if self.sequence.is_empty() {
            format!(">{}\n", self.id)
        } else {
            format!(">{}\n{}\n", self.id, self.sequence)
        }
    }
}

/// Ordered set of records, read once per run.
#[derive(Clone, Debug, Default)]
pub struct SequenceCollection {
    records: Vec<SequenceRecord>,
    // id -> index of the last record carrying it
    by_id: HashMap<String, usize>,
}

impl SequenceCollection {
    fn from_records(records: Vec<SequenceRecord>) -> Self {
        let by_id = records.iter().enumerate().map(|(i, r)| (r.id.clone(), i)).collect();
        Self { records, by_id }
    }

    /// Records in file order, duplicates included.
    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifiers in order of first appearance. A repeated identifier is
    /// listed once, at its first position.
    pub fn ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .map(|r| r.id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Look up a record by identifier; the last occurrence wins.
    pub fn get(&self, id: &str) -> Option<&SequenceRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Normalised multi-FASTA text of the whole set.
    pub fn to_fasta(&self) -> String {
        self.records.iter().map(SequenceRecord::to_fasta).collect()
    }
}

/// Parse FASTA text into a [`SequenceCollection`].
///
/// Anything before the first `>` is not part of a record and is ignored.
/// Chunks that are empty or whitespace-only are dropped, and so are records
/// whose header line has no identifier.
///
/// ## Errors
/// [`SeqMapError::MalformedInput`] when the text has no `>` marker, or when
/// every chunk is blank.
pub fn parse_sequences(text: &str) -> Result<SequenceCollection, SeqMapError> {
    parse_named(text, "<input>")
}

/// Read and parse a FASTA file.
pub fn read_sequences(path: &Path) -> Result<SequenceCollection, SeqMapError> {
    let text = std::fs::read_to_string(path).map_err(|e| SeqMapError::io("read", path, e))?;
    parse_named(&text, &path.display().to_string())
}

fn parse_named(text: &str, source_name: &str) -> Result<SequenceCollection, SeqMapError> {
    let Some(first) = text.find('>') else {
        return Err(SeqMapError::MalformedInput {
            source_name: source_name.to_string(),
            reason: "no '>' record marker found",
        });
    };
    if !text[..first].trim().is_empty() {
        tracing::warn!(source = source_name, "ignoring text before the first '>' record marker");
    }

    let mut records = Vec::new();
    for chunk in text[first + 1..].split('>') {
        if chunk.trim().is_empty() {
            continue;
        }
        let mut lines = chunk.lines();
        let Some(id) = lines.next().and_then(|header| header.split_whitespace().next()) else {
            tracing::warn!(source = source_name, records = records.len(), "skipping record with an empty header");
            continue;
        };
        let body: Vec<&str> = lines.filter_map(|l| l.split_whitespace().next()).collect();
        records.push(SequenceRecord { id: id.to_string(), sequence: body.join("\n") });
    }

    if records.is_empty() {
        return Err(SeqMapError::MalformedInput {
            source_name: source_name.to_string(),
            reason: "no non-empty records",
        });
    }
    tracing::debug!(source = source_name, records = records.len(), "parsed sequence set");
    Ok(SequenceCollection::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_keeps_first_token_only() {
        let set = parse_sequences(">sp|P1 some protein\tOS=x\nMK V\nLL\n").unwrap();
        assert_eq!(set.ids(), vec!["sp|P1"]);
        assert_eq!(set.records()[0].sequence, "MK\nLL");
    }

    #[test]
    fn blank_chunks_are_dropped() {
        let set = parse_sequences(">a\nAC\n>\n\n>  \n>b\nGT\n").unwrap();
        assert_eq!(set.ids(), vec!["a", "b"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn no_marker_is_malformed() {
        assert!(matches!(parse_sequences(""), Err(SeqMapError::MalformedInput { .. })));
        assert!(matches!(parse_sequences("ACGT\nACGT\n"), Err(SeqMapError::MalformedInput { .. })));
        assert!(matches!(parse_sequences(">\n>\n"), Err(SeqMapError::MalformedInput { .. })));
    }

    #[test]
    fn empty_header_never_takes_a_body_line_as_id() {
        let set = parse_sequences(">\nMKV\n>a2\nMKL\n").unwrap();
        assert_eq!(set.ids(), vec!["a2"]);
        assert!(!set.contains("MKV"));
        assert!(matches!(parse_sequences(">  \nMKV\n"), Err(SeqMapError::MalformedInput { .. })));
    }

    #[test]
    fn preamble_before_first_marker_is_ignored() {
        let set = parse_sequences("junk line\n>a\nAC\n").unwrap();
        assert_eq!(set.ids(), vec!["a"]);
    }

    #[test]
    fn duplicate_ids_keep_first_position_and_last_record() {
        let set = parse_sequences(">x\nAAA\n>y\nCCC\n>x\nGGG\n").unwrap();
        assert_eq!(set.ids(), vec!["x", "y"]);
        assert_eq!(set.get("x").unwrap().sequence, "GGG");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn to_fasta_normalises_headers() {
        let set = parse_sequences(">a desc\nMKV\n>b\n").unwrap();
        assert_eq!(set.to_fasta(), ">a\nMKV\n>b\n");
        assert_eq!(set.get("b").unwrap().to_fasta(), ">b\n");
    }
}
