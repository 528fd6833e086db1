//! Mapping properties driven through a scripted search executor.

use seqmap::{
    aggregate, format_report, map_collections, parse_sequences, QueryHits, SearchExecutor, SeqMapError,
    SequenceCollection,
};

/// Replays a fixed list of per-query hits.
struct Scripted(Vec<QueryHits>);

impl SearchExecutor for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn search(&self, _: &SequenceCollection, _: &SequenceCollection) -> Result<Vec<QueryHits>, SeqMapError> {
        Ok(self.0.clone())
    }
}

fn set_a() -> SequenceCollection {
    parse_sequences(">a1 kinase\nMKV\n>a2\nMKL\n>a3\nMKI\n>a4\nMKA\n").unwrap()
}

fn set_b() -> SequenceCollection {
    parse_sequences(">b1\nMKV\n>b2\nMKV\n>b3\nWWW\n>b4\nMKA\n>b5\nMKL\n").unwrap()
}

fn mixed_hits() -> Vec<QueryHits> {
    vec![
        QueryHits::from_targets("b1", &["a3", "a1", "a2"]),
        QueryHits::from_targets("b2", &["a1"]),
        QueryHits::from_targets("b4", &["a4", "a3"]),
        QueryHits::from_targets("b5", &["a2", "a1"]),
    ]
}

#[test]
fn scenario_all_hits() {
    let a = parse_sequences(">a1\nMK\n>a2\nMV\n").unwrap();
    let b = parse_sequences(">b1\nMK\n>b2\nMK\n>b3\nWW\n").unwrap();
    let exec = Scripted(vec![
        QueryHits::from_targets("b1", &["a1", "a2"]),
        QueryHits::from_targets("b2", &["a1"]),
    ]);
    let text = map_collections(&a, &b, &exec, false).unwrap();
    assert_eq!(text, "             a1    2 b1 b2\n             a2    1 b1\n");
}

#[test]
fn scenario_first_hit_only() {
    let a = parse_sequences(">a1\nMK\n>a2\nMV\n").unwrap();
    let b = parse_sequences(">b1\nMK\n>b2\nMK\n>b3\nWW\n").unwrap();
    let exec = Scripted(vec![
        QueryHits::from_targets("b1", &["a1", "a2"]),
        QueryHits::from_targets("b2", &["a1"]),
    ]);
    let text = map_collections(&a, &b, &exec, true).unwrap();
    assert_eq!(text, "             a1    2 b1 b2\n");
}

#[test]
fn report_order_is_set_a_order() {
    let a = set_a();
    let text = map_collections(&a, &set_b(), &Scripted(mixed_hits()), false).unwrap();
    let ids: Vec<&str> = text.lines().map(|l| l.split_whitespace().next().unwrap()).collect();
    assert_eq!(ids, vec!["a1", "a2", "a3", "a4"]);
}

#[test]
fn first_hit_mode_maps_each_query_once_to_its_first_target() {
    let a = set_a();
    let m = aggregate(mixed_hits(), &a.ids(), true);
    for qh in mixed_hits() {
        let owners: Vec<&str> = m.targets().filter(|t| m.get(t).unwrap().contains(&qh.query_id)).collect();
        assert_eq!(owners, vec![qh.targets().next().unwrap()]);
    }
}

#[test]
fn all_hits_mode_keeps_pair_count() {
    let a = set_a();
    let pairs: usize = mixed_hits().iter().map(|q| q.hits.len()).sum();
    let m = aggregate(mixed_hits(), &a.ids(), false);
    assert_eq!(m.total_assignments(), pairs);
}

#[test]
fn printed_counts_match_lists() {
    let a = set_a();
    let m = aggregate(mixed_hits(), &a.ids(), false);
    for line in format_report(&m, &a.ids()).lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let count: usize = fields[1].parse().unwrap();
        assert_eq!(count, fields.len() - 2);
        assert_eq!(count, m.get(fields[0]).unwrap().len());
    }
}

#[test]
fn no_hits_prints_bare_newline() {
    let text = map_collections(&set_a(), &set_b(), &Scripted(Vec::new()), true).unwrap();
    assert_eq!(text, "\n");
}
