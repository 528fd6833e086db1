//! Search executor contract and the typed readers for search-tool output.
//!
//! A [`SearchExecutor`] takes the database set (A) and the query set (B) and
//! returns one [`QueryHits`] per query that hit something, each ordered
//! best-first exactly as the tool reported it. Queries without hits are left
//! out. Raw tool text never leaves this layer: the readers below turn it into
//! [`HitRecord`]s.
//!
//! Two backends implement the trait: [`BlastpExecutor`](crate::blastp::BlastpExecutor)
//! (one `blastall` run per query) and [`PhmmerExecutor`](crate::phmmer::PhmmerExecutor)
//! (one batch `phmmer --tblout` run).
//!
use crate::common::SeqMapError;
use crate::sequence::SequenceCollection;

/// Heading of the one-line summary table in a BLAST text report.
pub const BLAST_SUMMARY_HEADING: &str = "Sequences producing significant alignments";

/// One (query, target) hit as reported by the search tool.
#[derive(Clone, Debug, PartialEq)]
pub struct HitRecord {
    /// Identifier of the query (set B).
    pub query_id: String,
    /// Identifier of the database entry that was hit (set A).
    pub target_id: String,
    /// 0-based position of this hit in the tool's list for the query.
    pub rank: usize,
    /// E-value, when the tool reports one. Informational only.
    pub evalue: Option<f64>,
}

/// Ordered hit list for one query. Never empty when produced by an executor.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryHits {
    pub query_id: String,
    pub hits: Vec<HitRecord>,
}

impl QueryHits {
    /// Build a hit list from target ids in tool order.
    pub fn from_targets<S: AsRef<str>>(query_id: &str, targets: &[S]) -> Self {
        let hits = targets
            .iter()
            .enumerate()
            .map(|(rank, t)| HitRecord {
                query_id: query_id.to_string(),
                target_id: t.as_ref().to_string(),
                rank,
                evalue: None,
            })
            .collect();
        Self { query_id: query_id.to_string(), hits }
    }

    /// Target ids in tool order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.hits.iter().map(|h| h.target_id.as_str())
    }
}

/// Strategy that runs a similarity search of `queries` against `database`.
pub trait SearchExecutor {
    /// Short tool name used in logs and errors.
    fn name(&self) -> &str;

    /// Run the search and return per-query hit lists in emission order.
    fn search(
        &self,
        database: &SequenceCollection,
        queries: &SequenceCollection,
    ) -> Result<Vec<QueryHits>, SeqMapError>;
}

/// Read the hit summary of a BLAST (`blastall -p blastp`) text report.
///
/// The targets are the first tokens of the lines between the
/// [`BLAST_SUMMARY_HEADING`] line and the first alignment block (`>`). Only
/// lines starting in the first column are summaries. A leading `lcl|` is
/// stripped. The last column is taken as the E-value when
/// it parses. A report without the heading has no hits.
pub fn parse_blast_report(query_id: &str, report: &str) -> Vec<HitRecord> {
    let Some(pos) = report.find(BLAST_SUMMARY_HEADING) else {
        return Vec::new();
    };
    let after = &report[pos + BLAST_SUMMARY_HEADING.len()..];
    let summary = after.split('>').next().unwrap_or("");

    let mut out = Vec::new();
    // first line is the rest of the heading: "...:   (bits) Value"
    for line in summary.lines().skip(1) {
        if line.starts_with(char::is_whitespace) {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else { continue };
        let target = first.strip_prefix("lcl|").unwrap_or(first);
        let evalue = tokens.last().and_then(parse_evalue);
        out.push(HitRecord {
            query_id: query_id.to_string(),
            target_id: target.to_string(),
            rank: out.len(),
            evalue,
        });
    }
    out
}

/// BLAST prints tiny E-values as `e-100`; treat a bare exponent as `1e-100`.
fn parse_evalue(s: &str) -> Option<f64> {
    if s.starts_with('e') {
        format!("1{}", s).parse().ok()
    } else {
        s.parse().ok()
    }
}

/// Read a HMMER `--tblout` per-target table.
///
/// Comment (`#`) and blank lines are skipped. Column 1 is the target name,
/// column 3 the query name, column 5 the full-sequence E-value. Ranks count
/// per query in line order.
///
/// ## Errors
/// [`SeqMapError::SearchExecution`] when a data line has fewer than five
/// columns.
pub fn parse_tblout(text: &str) -> Result<Vec<HitRecord>, SeqMapError> {
    let mut ranks: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut out = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 5 {
            return Err(SeqMapError::search(
                "phmmer",
                format!("tblout line {} has {} column(s), expected at least 5", lineno + 1, cols.len()),
            ));
        }
        let query_id = cols[2].to_string();
        let rank = ranks.entry(query_id.clone()).or_insert(0);
        out.push(HitRecord {
            target_id: cols[0].to_string(),
            evalue: cols[4].parse().ok(),
            query_id,
            rank: *rank,
        });
        *rank += 1;
    }
    Ok(out)
}

/// Group hit records into per-query lists. Consecutive records of the same
/// query share a list; line order is kept as is, so a query that reappears
/// later starts a new list.
pub fn group_by_query(records: Vec<HitRecord>) -> Vec<QueryHits> {
    let mut out: Vec<QueryHits> = Vec::new();
    for rec in records {
        match out.last_mut() {
            Some(last) if last.query_id == rec.query_id => last.hits.push(rec),
            _ => out.push(QueryHits { query_id: rec.query_id.clone(), hits: vec![rec] }),
        }
    }
    out
}
