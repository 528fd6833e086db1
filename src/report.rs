//! Rendering a [`MappingResult`] in set-A order.
//!
//! The text report has one line per database entry with at least one query:
//!
//! ```text
//!              a1    2 b1 b2
//! ```
//!
//! i.e. the id right-justified in 15 columns, the count right-justified in
//! 5, one space, then the query ids. The report always ends with a single
//! newline, so an empty mapping renders as `"\n"`.
use std::io::Write;

use crate::aggregate::MappingResult;

/// Minimum width of the database-id column.
pub const ID_WIDTH: usize = 15;
/// Minimum width of the count column.
pub const COUNT_WIDTH: usize = 5;

/// Iterate `(id, queries)` for every id in `a_ids` that has hits.
fn mapped_in_order<'a, S: AsRef<str>>(
    mapping: &'a MappingResult,
    a_ids: &'a [S],
) -> impl Iterator<Item = (&'a str, &'a [String])> + 'a {
    a_ids.iter().filter_map(move |id| {
        let id = id.as_ref();
        mapping.get(id).map(|queries| (id, queries))
    })
}

/// One fixed-width report line (no trailing newline).
pub fn format_line(target_id: &str, queries: &[String]) -> String {
    format!("{:>iw$}{:>cw$} {}", target_id, queries.len(), queries.join(" "), iw = ID_WIDTH, cw = COUNT_WIDTH)
}

/// Render the text report.
pub fn format_report<S: AsRef<str>>(mapping: &MappingResult, a_ids: &[S]) -> String {
    let lines: Vec<String> = mapped_in_order(mapping, a_ids).map(|(id, q)| format_line(id, q)).collect();
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Write a tab-separated summary (`target_id`, `count`, comma-joined
/// `query_ids`) in the same order as the text report.
pub fn write_summary_tsv<S: AsRef<str>, W: Write>(
    mapping: &MappingResult,
    a_ids: &[S],
    writer: W,
) -> csv::Result<()> {
    let mut w = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    w.write_record(["target_id", "count", "query_ids"])?;
    for (id, queries) in mapped_in_order(mapping, a_ids) {
        w.write_record([id.to_string(), queries.len().to_string(), queries.join(",")])?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MappingResult {
        let mut m = MappingResult::new();
        m.insert("a2", "b1");
        m.insert("a1", "b1");
        m.insert("a1", "b2");
        m
    }

    #[test]
    fn lines_follow_set_a_order() {
        let text = format_report(&sample(), &["a1", "a2", "a3"]);
        assert_eq!(text, "             a1    2 b1 b2\n             a2    1 b1\n");
    }

    #[test]
    fn empty_mapping_is_a_single_newline() {
        assert_eq!(format_report(&MappingResult::new(), &["a1"]), "\n");
    }

    #[test]
    fn long_ids_are_not_truncated() {
        let line = format_line("a_really_long_identifier", &["q".to_string()]);
        assert_eq!(line, "a_really_long_identifier    1 q");
    }

    #[test]
    fn formatting_is_repeatable() {
        let m = sample();
        assert_eq!(format_report(&m, &["a1", "a2"]), format_report(&m, &["a1", "a2"]));
    }

    #[test]
    fn tsv_summary() {
        let mut buf = Vec::new();
        write_summary_tsv(&sample(), &["a1", "a2"], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "target_id\tcount\tquery_ids\na1\t2\tb1,b2\na2\t1\tb1\n");
    }
}
