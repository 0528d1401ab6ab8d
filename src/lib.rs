//! A streaming partitioner for line-oriented chemical structure archives.
//! It recognizes record boundaries in MOL2, SDF, and Maestro files and writes the
//! records back out as numbered partitions or as one file per named record.
//!
//! # Features
//!
//! - **Three boundary conventions** — `MOLECULE` and `f_m_ct ` markers open a
//!   record, `$$$$` closes one; the rule is chosen once from the [`Format`]
//! - **Streaming** — input is read line by line and passed straight through, so
//!   archives far larger than memory split in constant space
//! - **Byte-exact output** — payload lines are never parsed or re-encoded
//! - **Two layouts** — `part<N>.<ext>` partitions of a fixed record count, or
//!   `<name>.mol2` files named after each MOL2 record
//!
//! # Quick Start
//!
//! ```
//! use mol2split::{Format, SplitConfig, segment};
//!
//! let archive = "\
//! @<TRIPOS>MOLECULE
//! benzene
//! @<TRIPOS>MOLECULE
//! phenol
//! @<TRIPOS>MOLECULE
//! toluene
//! ";
//!
//! let dir = tempfile::tempdir()?;
//! let config = SplitConfig::new(Format::Mol2, 2);
//! let mut sink = config.sink(dir.path());
//!
//! let report = segment(archive.as_bytes(), &config, &mut sink)?;
//!
//! assert_eq!(report.records, 3);
//! assert_eq!(report.files_written, 2);
//!
//! let second = std::fs::read_to_string(dir.path().join("part2.mol2"))?;
//! assert_eq!(second, "@<TRIPOS>MOLECULE\ntoluene\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — [`Format`] detection, the [`OutputSink`] file lifecycle, and the
//!   byte-oriented line reader
//! - [`segment`] / [`split_file`] — the segmentation engine
//!
//! # Data Types
//!
//! - [`SplitConfig`] — format plus records per partition
//! - [`Layout`] — numbered partitions or per-record files, derived from the config
//! - [`BoundaryRule`] / [`Placement`] — marker substring and whether it opens or
//!   closes a record
//! - [`OutputTarget`] — a partition number or a record name
//! - [`SplitReport`] — counters describing a finished run

mod split;

pub mod io;

pub use io::{Format, OutputSink, OutputTarget, ParseFormatError};
pub use split::{BoundaryRule, Layout, Placement, SplitConfig, SplitReport, segment, split_file};

pub use io::Error;
