use std::collections::HashSet;

use super::{Layout, Placement};
use crate::io::{Error, OutputSink, OutputTarget};

/// Upper bound on bytes held back while the destination of a line is unknown.
const HELD_BYTES_LIMIT: usize = 1 << 20;

#[derive(Debug, Default, Clone, Copy)]
pub(super) struct Tally {
    pub records: usize,
    pub overwritten: usize,
}

/// Output layout strategy driven by the segmentation loop.
///
/// The loop reports three events per line: a record opened by a leading
/// marker, the line itself, and a record closed by a trailing marker.
pub(super) enum RecordWriter {
    Partitioned(Partitioned),
    PerRecord(PerRecord),
}

impl RecordWriter {
    pub fn new(layout: Layout, placement: Placement) -> Self {
        match layout {
            Layout::Partitioned {
                records_per_partition,
            } => Self::Partitioned(Partitioned::new(records_per_partition, placement)),
            Layout::PerRecord => Self::PerRecord(PerRecord::default()),
        }
    }

    pub fn begin(&mut self, sink: &mut OutputSink) -> Result<(), Error> {
        match self {
            Self::Partitioned(w) => w.begin(sink),
            Self::PerRecord(_) => Ok(()),
        }
    }

    pub fn record_opened(&mut self, sink: &mut OutputSink) -> Result<(), Error> {
        match self {
            Self::Partitioned(w) => {
                w.record_opened();
                Ok(())
            }
            Self::PerRecord(w) => w.record_opened(sink),
        }
    }

    pub fn write_line(
        &mut self,
        sink: &mut OutputSink,
        line_no: usize,
        line: &[u8],
    ) -> Result<(), Error> {
        match self {
            Self::Partitioned(w) => w.write_line(sink, line_no, line),
            Self::PerRecord(w) => w.write_line(sink, line_no, line),
        }
    }

    pub fn record_closed(&mut self) {
        match self {
            Self::Partitioned(w) => w.record_closed(),
            // Per-record naming only exists for formats whose markers open records.
            Self::PerRecord(_) => {}
        }
    }

    pub fn finish(self, sink: &mut OutputSink) -> Result<Tally, Error> {
        match self {
            Self::Partitioned(w) => w.finish(sink),
            Self::PerRecord(w) => w.finish(sink),
        }
    }
}

/// Lines waiting for the file they belong to.
#[derive(Default)]
struct Held {
    lines: Vec<Vec<u8>>,
    bytes: usize,
    first_line: usize,
}

impl Held {
    fn push(&mut self, line_no: usize, line: &[u8]) {
        if self.lines.is_empty() {
            self.first_line = line_no;
        }
        self.bytes += line.len() + 1;
        self.lines.push(line.to_vec());
    }

    fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn is_full(&self) -> bool {
        self.bytes >= HELD_BYTES_LIMIT
    }

    fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| is_blank(l))
    }

    fn write_to(&mut self, sink: &mut OutputSink) -> Result<(), Error> {
        for line in self.lines.drain(..) {
            sink.write_line(&line)?;
        }
        self.bytes = 0;
        Ok(())
    }
}

pub(super) struct Partitioned {
    capacity: usize,
    placement: Placement,
    index: usize,
    filled: usize,
    in_record: bool,
    rotate_pending: bool,
    held: Held,
    records: usize,
}

impl Partitioned {
    fn new(capacity: usize, placement: Placement) -> Self {
        Self {
            capacity: capacity.max(1),
            placement,
            index: 0,
            filled: 0,
            in_record: false,
            rotate_pending: false,
            held: Held::default(),
            records: 0,
        }
    }

    fn begin(&mut self, sink: &mut OutputSink) -> Result<(), Error> {
        self.index = 1;
        sink.open(&OutputTarget::Partition(self.index))?;
        Ok(())
    }

    fn record_opened(&mut self) {
        // Lines before the first marker belong to the first record.
        if self.in_record {
            self.complete();
        }
        self.in_record = true;
    }

    fn record_closed(&mut self) {
        self.complete();
        self.in_record = false;
    }

    fn write_line(
        &mut self,
        sink: &mut OutputSink,
        line_no: usize,
        line: &[u8],
    ) -> Result<(), Error> {
        // Rotation waits for the next non-blank line: blank lines after a
        // closing marker go wherever the following content goes, or stay in
        // the last partition at end of input.
        if self.rotate_pending {
            if is_blank(line) && !self.held.is_full() {
                self.held.push(line_no, line);
                return Ok(());
            }
            self.index += 1;
            sink.rotate(&OutputTarget::Partition(self.index))?;
            self.rotate_pending = false;
            self.held.write_to(sink)?;
        }
        sink.write_line(line)?;

        if self.placement == Placement::Closes && !is_blank(line) {
            self.in_record = true;
        }
        Ok(())
    }

    fn complete(&mut self) {
        self.records += 1;
        self.filled += 1;
        if self.filled == self.capacity {
            self.filled = 0;
            self.rotate_pending = true;
        }
    }

    fn finish(mut self, sink: &mut OutputSink) -> Result<Tally, Error> {
        self.held.write_to(sink)?;
        Ok(Tally {
            records: self.records + usize::from(self.in_record),
            overwritten: 0,
        })
    }
}

/// One file per record, named after the line following its marker.
///
/// The previous record's file stays open until the next record's name is
/// known. Lines of a record that never gets a name are appended to the
/// record before it; lines before the first named record join that record.
#[derive(Default)]
pub(super) struct PerRecord {
    held: Held,
    since_marker: Option<usize>,
    names: HashSet<String>,
    records: usize,
    overwritten: usize,
}

impl PerRecord {
    fn record_opened(&mut self, sink: &mut OutputSink) -> Result<(), Error> {
        if self.since_marker.is_some() && sink.is_open() {
            tracing::warn!(
                line = self.held.first_line,
                "record has no name line, appending it to the previous file"
            );
            self.held.write_to(sink)?;
        }
        self.since_marker = Some(0);
        Ok(())
    }

    fn write_line(
        &mut self,
        sink: &mut OutputSink,
        line_no: usize,
        line: &[u8],
    ) -> Result<(), Error> {
        match self.since_marker {
            None if sink.is_open() => return sink.write_line(line),
            Some(1) => {
                let name = record_name(line, line_no)?;
                self.held.push(line_no, line);
                self.since_marker = None;
                return self.open_record(sink, name, line_no);
            }
            _ => {}
        }

        if !sink.is_open() && self.held.is_full() {
            return Err(Error::MissingRecordName {
                line: self.held.first_line,
            });
        }
        self.held.push(line_no, line);
        if let Some(n) = self.since_marker.as_mut() {
            *n += 1;
        }
        Ok(())
    }

    fn open_record(
        &mut self,
        sink: &mut OutputSink,
        name: String,
        line_no: usize,
    ) -> Result<(), Error> {
        if !self.names.insert(name.clone()) {
            tracing::warn!(%name, line = line_no, "duplicate record name, overwriting earlier file");
            self.overwritten += 1;
        }
        sink.open(&OutputTarget::Record(name))?;
        self.records += 1;
        self.held.write_to(sink)
    }

    fn finish(mut self, sink: &mut OutputSink) -> Result<Tally, Error> {
        if !self.held.is_empty() {
            if sink.is_open() {
                tracing::warn!(
                    line = self.held.first_line,
                    "record has no name line, appending it to the previous file"
                );
                self.held.write_to(sink)?;
            } else if !self.held.is_blank() {
                return Err(Error::MissingRecordName {
                    line: self.held.first_line,
                });
            }
        }

        Ok(Tally {
            records: self.records,
            overwritten: self.overwritten,
        })
    }
}

/// Turns the name line of a record into a file stem.
///
/// Only names that would resolve outside the output directory are refused.
fn record_name(line: &[u8], line_no: usize) -> Result<String, Error> {
    let raw = line.strip_suffix(b"\r").unwrap_or(line);
    let name = String::from_utf8_lossy(raw).into_owned();
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(Error::InvalidRecordName {
            line: line_no,
            name,
        });
    }
    Ok(name)
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::Format;

    #[test]
    fn record_name_is_taken_verbatim() {
        assert_eq!(record_name(b"ZINC00012345", 2).unwrap(), "ZINC00012345");
        assert_eq!(record_name(b" lig 7 ", 2).unwrap(), " lig 7 ");
        assert_eq!(record_name(b"", 2).unwrap(), "");
        assert_eq!(record_name(b"   ", 2).unwrap(), "   ");
    }

    #[test]
    fn record_name_drops_carriage_return() {
        assert_eq!(record_name(b"aspirin\r", 2).unwrap(), "aspirin");
    }

    #[test]
    fn record_name_replaces_invalid_utf8() {
        assert_eq!(record_name(b"mol\xff", 2).unwrap(), "mol\u{fffd}");
    }

    #[test]
    fn record_name_rejects_paths() {
        let bad_names: [&[u8]; 6] = [b".", b"..", b"a/b", b"a\\b", b"a\0b", b"../x\r"];
        for bad in bad_names {
            let err = record_name(bad, 9).unwrap_err();
            assert!(
                matches!(err, Error::InvalidRecordName { line: 9, .. }),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn partitioned_rotation_is_deferred_until_next_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = OutputSink::new(dir.path(), Format::Sdf);
        let mut w = Partitioned::new(1, Placement::Closes);
        w.begin(&mut sink).unwrap();
        w.write_line(&mut sink, 1, b"$$$$").unwrap();
        w.record_closed();
        assert!(w.rotate_pending);
        assert_eq!(w.index, 1);

        w.write_line(&mut sink, 2, b"").unwrap();
        assert!(w.rotate_pending);
        assert_eq!(w.finish(&mut sink).unwrap().records, 1);
        assert_eq!(sink.files_opened(), 1);
    }

    #[test]
    fn held_lines_report_their_first_line() {
        let mut held = Held::default();
        held.push(4, b"  ");
        held.push(5, b"");
        assert_eq!(held.first_line, 4);
        assert!(held.is_blank());
        held.push(6, b"x");
        assert!(!held.is_blank());
        assert!(!held.is_full());
    }

    #[test]
    fn blank_lines_are_detected() {
        assert!(is_blank(b""));
        assert!(is_blank(b" \t\r"));
        assert!(!is_blank(b" x "));
    }
}
