//! Record segmentation: boundary detection and partition rotation.
//!
//! A single loop walks the input once. For every line it asks the format's
//! [`BoundaryRule`] whether the line is a marker, tells the active layout
//! strategy when a record opens or closes, and forwards the line to the
//! [`OutputSink`]. Leading markers close the previous record before they are
//! written; trailing markers close the current record after they are written.

mod boundary;
mod writer;

pub use boundary::{BoundaryRule, Placement};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::io::{Error, Format, LineReader, OutputSink};
use writer::RecordWriter;

/// How records are distributed over output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `part<N>.<ext>` files holding up to `records_per_partition` records each.
    Partitioned { records_per_partition: usize },
    /// One file per record, named after the record's name line.
    PerRecord,
}

/// Settings for one segmentation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfig {
    format: Format,
    records_per_partition: usize,
}

impl SplitConfig {
    /// Builds a configuration, coercing a partition size below 1 to 1.
    pub fn new(format: Format, records_per_partition: i64) -> Self {
        let records_per_partition = if records_per_partition < 1 {
            1
        } else {
            usize::try_from(records_per_partition).unwrap_or(usize::MAX)
        };
        Self {
            format,
            records_per_partition,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn records_per_partition(&self) -> usize {
        self.records_per_partition
    }

    /// Creates a sink writing this configuration's file extension into `dir`.
    pub fn sink(&self, dir: impl Into<PathBuf>) -> OutputSink {
        OutputSink::new(dir, self.format)
    }

    pub fn rule(&self) -> BoundaryRule {
        BoundaryRule::for_format(self.format)
    }

    /// Per-record files are only produced for MOL2 with one record per partition.
    pub fn layout(&self) -> Layout {
        if self.records_per_partition == 1 && self.format.names_single_records() {
            Layout::PerRecord
        } else {
            Layout::Partitioned {
                records_per_partition: self.records_per_partition,
            }
        }
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::new(Format::default(), 1)
    }
}

/// Counters describing a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Input lines copied to output.
    pub lines: usize,
    /// Records delimited by boundary markers, including a trailing unterminated
    /// one. In per-record mode only records that received a name are counted.
    pub records: usize,
    /// Distinct output files created by this run.
    pub files_written: usize,
    /// Per-record files replaced by a later record with the same name.
    pub overwritten: usize,
}

/// Splits `input` into the files of `sink` according to `config`.
///
/// The sink must write the configured format's extension; see
/// [`SplitConfig::sink`]. The sink's current file is closed before returning,
/// on success and on every error path. Files completed before a failure stay
/// on disk.
pub fn segment<R: BufRead>(
    input: R,
    config: &SplitConfig,
    sink: &mut OutputSink,
) -> Result<SplitReport, Error> {
    if sink.format() != config.format() {
        return Err(Error::FormatMismatch {
            sink: sink.format(),
            config: config.format(),
        });
    }

    let _span = tracing::debug_span!(
        "segment",
        format = %config.format(),
        records_per_partition = config.records_per_partition()
    )
    .entered();

    let result = run(input, config, sink);
    let closed = sink.close();
    let report = result?;
    closed?;

    tracing::debug!(
        lines = report.lines,
        records = report.records,
        files = report.files_written,
        "segmentation finished"
    );
    Ok(report)
}

fn run<R: BufRead>(
    input: R,
    config: &SplitConfig,
    sink: &mut OutputSink,
) -> Result<SplitReport, Error> {
    let rule = config.rule();
    let opened_before = sink.files_opened();
    let mut writer = RecordWriter::new(config.layout(), rule.placement);
    writer.begin(sink)?;

    let mut reader = LineReader::new(input);
    while let Some((line_no, line)) = reader.next_line()? {
        let boundary = rule.matches(line);
        if boundary && rule.opens() {
            writer.record_opened(sink)?;
        }
        writer.write_line(sink, line_no, line)?;
        if boundary && !rule.opens() {
            writer.record_closed();
        }
    }

    let tally = writer.finish(sink)?;
    Ok(SplitReport {
        lines: reader.lines_read(),
        records: tally.records,
        files_written: sink.files_opened() - opened_before - tally.overwritten,
        overwritten: tally.overwritten,
    })
}

/// Opens `input` and splits it into files under `output_dir`, which must exist.
pub fn split_file(
    input: &Path,
    output_dir: &Path,
    config: &SplitConfig,
) -> Result<SplitReport, Error> {
    let file = File::open(input).map_err(|source| Error::InputOpen {
        path: input.to_path_buf(),
        source,
    })?;
    let mut sink = config.sink(output_dir);
    segment(BufReader::new(file), config, &mut sink)
}
