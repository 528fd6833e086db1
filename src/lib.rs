//! # seqmap
//!
//! Map the entries of one protein FASTA library (set A) onto another (set B)
//! using a similarity search tool.
//!
//! Every record of set B is searched against set A, either with legacy NCBI
//! BLAST (`formatdb` + `blastall -p blastp`, one query at a time) or with a
//! single HMMER `phmmer --tblout` run. The hits are folded into a mapping
//! from A entries to the B entries that hit them, and printed in set-A order:
//!
//! ```text
//!              a1    2 b1 b2
//!              a2    1 b1
//! ```
//!
//! With `mapfirst` (the default) each query only counts towards its best hit;
//! otherwise every hit counts.
//!
//! The search tool sits behind the [`SearchExecutor`] trait, so the mapping
//! itself can be driven by any source of ranked hits.
//!
//! ### Example
//! ```
//! use seqmap::{aggregate, format_report, parse_sequences, QueryHits};
//! let a = parse_sequences(">a1\nMKV\n>a2\nMKL\n").unwrap();
//! let hits = vec![
//!     QueryHits::from_targets("b1", &["a1", "a2"]),
//!     QueryHits::from_targets("b2", &["a1"]),
//! ];
//! let mapping = aggregate(hits, &a.ids(), false);
//! assert_eq!(format_report(&mapping, &a.ids()), "             a1    2 b1 b2\n             a2    1 b1\n");
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod aggregate;
pub mod blastp;
pub mod common;
pub mod config;
pub mod phmmer;
pub mod pipeline;
pub mod process;
pub mod report;
pub mod search;
pub mod sequence;

pub use aggregate::{aggregate, MappingResult};
pub use blastp::BlastpExecutor;
pub use common::SeqMapError;
pub use config::{Backend, MapConfig};
pub use phmmer::PhmmerExecutor;
pub use pipeline::{map_collections, map_files, run_mapping, MappingReport};
pub use report::{format_line, format_report, write_summary_tsv};
pub use search::{group_by_query, parse_blast_report, parse_tblout, HitRecord, QueryHits, SearchExecutor};
pub use sequence::{parse_sequences, read_sequences, SequenceCollection, SequenceRecord};
