//! Folding per-query hit lists into a mapping of database entries to queries.
//!
//! The fold is a single pass over the executor's output:
//! - with `mapfirst`, a query contributes only its first hit, and a query
//!   that already appeared earlier in the run is skipped;
//! - without it, every hit contributes.
//!
//! Each contribution appends the query id to the target's list, in discovery
//! order. Targets that are not part of set A are dropped.
//!
//! ### Examples
//! ```rust,no_run
//! use seqmap::{aggregate, QueryHits};
//! let hits = vec![
//!     QueryHits::from_targets("b1", &["a1", "a2"]),
//!     QueryHits::from_targets("b2", &["a1"]),
//! ];
//! let m = aggregate(hits, &["a1", "a2"], true);
//! assert_eq!(m.get("a1").unwrap(), &["b1", "b2"]);
//! assert!(m.get("a2").is_none());
//! ```
//!
use std::collections::{HashMap, HashSet};

use crate::search::QueryHits;

/// Database entry id -> query ids that hit it, in discovery order.
///
/// Keys are kept in insertion order next to the lookup table so iteration
/// is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappingResult {
    keys: Vec<String>,
    lists: HashMap<String, Vec<String>>,
}

impl MappingResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `query_id` under `target_id`. Returns `false` if the pair was
    /// already recorded.
    pub fn insert(&mut self, target_id: &str, query_id: &str) -> bool {
        match self.lists.get_mut(target_id) {
            Some(list) => {
                if list.iter().any(|q| q == query_id) {
                    return false;
                }
                list.push(query_id.to_string());
            }
            None => {
                self.keys.push(target_id.to_string());
                self.lists.insert(target_id.to_string(), vec![query_id.to_string()]);
            }
        }
        true
    }

    /// Query ids mapped to `target_id`, if any.
    pub fn get(&self, target_id: &str) -> Option<&[String]> {
        self.lists.get(target_id).map(Vec::as_slice)
    }

    /// Targets in the order they were first hit.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Number of targets with at least one query.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sum of all list lengths.
    pub fn total_assignments(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }
}

/// Aggregate hit lists (in emission order) into a [`MappingResult`].
///
/// `a_ids` is set A's identifier list; hits on anything else are dropped.
/// With `mapfirst` only a query's first hit is looked at, even when that hit
/// is dropped.
pub fn aggregate<I, S>(hits: I, a_ids: &[S], mapfirst: bool) -> MappingResult
where
    I: IntoIterator<Item = QueryHits>,
    S: AsRef<str>,
{
    let known: HashSet<&str> = a_ids.iter().map(|s| s.as_ref()).collect();
    let mut seen_queries: HashSet<String> = HashSet::new();
    let mut result = MappingResult::new();

    for qh in hits {
        let contributing = if mapfirst {
            if !seen_queries.insert(qh.query_id.clone()) {
                tracing::debug!(query = %qh.query_id, "query already mapped; skipping repeat");
                continue;
            }
            &qh.hits[..qh.hits.len().min(1)]
        } else {
            &qh.hits[..]
        };
        for hit in contributing {
            if !known.contains(hit.target_id.as_str()) {
                tracing::warn!(query = %qh.query_id, target = %hit.target_id, "hit on an id outside the database set; dropped");
                continue;
            }
            result.insert(&hit.target_id, &qh.query_id);
        }
    }
    result
}
